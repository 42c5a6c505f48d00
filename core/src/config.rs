use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE_PATH: &str = "swift_codes.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Environment variable naming the SQLite database file.
pub const ENV_DATABASE_PATH: &str = "SWIFTDIR_DB";
/// Environment variable carrying the listen port.
pub const ENV_PORT: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// SQLite path or URI. `:memory:` gives a private in-memory database.
    pub database_path: String,
    pub bind_addr: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
        }
    }
}

impl DirectoryConfig {
    /// Defaults, overlaid by the JSON file at `path` (if given), overlaid by
    /// the environment.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
                serde_json::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `SWIFTDIR_DB` and `PORT` from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(db) = lookup(ENV_DATABASE_PATH).filter(|v| !v.is_empty()) {
            self.database_path = db;
        }
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            let port: u16 = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {ENV_PORT} '{port}': {e}"))?;
            self.set_port(port);
        }
        Ok(())
    }

    /// Keep the host of `bind_addr`, replace its port.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .bind_addr
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        self.bind_addr = format!("{host}:{port}");
    }

    pub fn default_test() -> Self {
        Self {
            database_path: ":memory:".into(),
            bind_addr: "127.0.0.1:0".into(),
        }
    }
}
