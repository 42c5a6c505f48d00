//! swiftdir: serves the bank directory over HTTP, or bulk-loads it.
//!
//! Usage:
//!   swiftdir --db swift_codes.db --port 8080
//!   swiftdir --config swiftdir.json
//!   swiftdir --db swift_codes.db --import swift_codes.xlsx
//!   swiftdir --db swift_codes.db --import swift_codes.csv

use anyhow::Result;
use std::env;
use std::path::Path;
use swiftdir_core::{
    api::{swift_code_router, AppState},
    config::DirectoryConfig,
    directory::BankDirectory,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = DirectoryConfig::load(flag_value(&args, "--config"))?;
    if let Some(db) = flag_value(&args, "--db") {
        config.database_path = db.to_string();
    }
    if let Some(port) = parse_arg::<u16>(&args, "--port") {
        config.set_port(port);
    }

    let directory = BankDirectory::open(&config)?;
    log::info!("database: {}", config.database_path);

    if let Some(sheet_path) = flag_value(&args, "--import") {
        let report = directory.import_file(Path::new(sheet_path))?;
        println!("=== IMPORT SUMMARY ===");
        println!("  file:        {sheet_path}");
        println!("  inserted:    {}", report.inserted);
        println!("  duplicates:  {}", report.duplicates);
        println!("  rejected:    {}", report.rejected);
        return Ok(());
    }

    let app = swift_code_router(AppState::new(directory));
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot bind {}: {e}", config.bind_addr))?;
    log::info!("listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    flag_value(args, flag).and_then(|v| v.parse().ok())
}
