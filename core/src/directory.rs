//! The bank directory: the one entry point callers use.
//!
//! Owns the store handle for its whole lifetime; the connection is closed
//! when the directory is dropped.

use crate::{
    classifier,
    config::DirectoryConfig,
    error::{DirectoryError, DirectoryResult},
    hierarchy,
    import::{self, ImportReport},
    projector::{self, CountryRoster, SwiftCodeDetails},
    registration::BankRegistration,
    store::DirectoryStore,
    types::{BankId, NewBank},
};
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

pub struct BankDirectory {
    store: DirectoryStore,
}

impl BankDirectory {
    /// Wrap an already migrated store.
    pub fn new(store: DirectoryStore) -> Self {
        Self { store }
    }

    /// Open the configured database and apply the schema.
    pub fn open(config: &DirectoryConfig) -> DirectoryResult<Self> {
        let store = if config.database_path == ":memory:" {
            DirectoryStore::in_memory()?
        } else {
            DirectoryStore::open(&config.database_path)?
        };
        store.migrate()?;
        Ok(Self::new(store))
    }

    /// Fresh, migrated in-memory directory (used in tests).
    pub fn in_memory() -> DirectoryResult<Self> {
        Self::open(&DirectoryConfig::default_test())
    }

    pub fn store(&self) -> &DirectoryStore {
        &self.store
    }

    // ── Lookups ───────────────────────────────────────────────────

    /// Headquarters codes return the headquarters with its branches; any
    /// other code returns the flat record. `None` when nothing matches,
    /// including codes that could never have been registered.
    pub fn bank_by_code(&self, swift_code: &str) -> DirectoryResult<Option<SwiftCodeDetails>> {
        if classifier::validate_swift_code(swift_code).is_err() {
            return Ok(None);
        }
        let Some(class) = classifier::classify(swift_code) else {
            return Ok(None);
        };

        if class.is_headquarter {
            let rows = self.store.rows_by_group_key(class.group_key)?;
            Ok(projector::project_headquarter(&rows, swift_code).map(SwiftCodeDetails::Headquarter))
        } else {
            let rows = self.store.rows_by_code(swift_code)?;
            Ok(projector::project_branch(&rows).map(SwiftCodeDetails::Branch))
        }
    }

    pub fn banks_by_country(&self, country_iso2: &str) -> DirectoryResult<Option<CountryRoster>> {
        let iso2 = country_iso2.trim().to_uppercase();
        let rows = self.store.rows_by_country(&iso2)?;
        Ok(projector::project_country(&rows))
    }

    // ── Mutations ─────────────────────────────────────────────────

    pub fn register(&self, registration: BankRegistration) -> DirectoryResult<BankId> {
        let bank = registration.into_new_bank()?;
        self.register_bank(&bank)
    }

    pub fn register_bank(&self, bank: &NewBank) -> DirectoryResult<BankId> {
        hierarchy::register_bank(&self.store, bank)
    }

    pub fn remove(&self, swift_code: &str) -> DirectoryResult<()> {
        hierarchy::remove_bank(&self.store, swift_code)
    }

    pub fn import_csv<R: Read>(&self, reader: R) -> DirectoryResult<ImportReport> {
        import::import_csv(&self.store, reader)
    }

    pub fn import_xlsx<R: Read + Seek>(&self, reader: R) -> DirectoryResult<ImportReport> {
        import::import_xlsx(&self.store, reader)
    }

    /// Import a spreadsheet file: `.xlsx` is read as a workbook, anything
    /// else as CSV.
    pub fn import_file(&self, path: &Path) -> DirectoryResult<ImportReport> {
        let file = File::open(path).map_err(|e| {
            DirectoryError::Other(anyhow::anyhow!("Cannot open {}: {e}", path.display()))
        })?;
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

        log::info!("importing {}", path.display());
        if is_workbook {
            self.import_xlsx(BufReader::new(file))
        } else {
            self.import_csv(BufReader::new(file))
        }
    }
}
