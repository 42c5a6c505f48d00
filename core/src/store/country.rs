use super::DirectoryStore;
use crate::{error::DirectoryResult, types::{CountryId, Location}};
use rusqlite::{params, OptionalExtension};

impl DirectoryStore {
    // ── Countries ─────────────────────────────────────────────────

    pub fn country_id_by_iso2(&self, iso2: &str) -> DirectoryResult<Option<CountryId>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM countries WHERE iso2 = ?1",
                params![iso2],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Insert the country unless a row with the same ISO2 already exists.
    /// Returns the number of rows written (0 when another writer won).
    pub fn insert_country_if_absent(&self, location: &Location) -> DirectoryResult<usize> {
        let written = self.conn.execute(
            "INSERT INTO countries (iso2, name, timezone) VALUES (?1, ?2, ?3)
             ON CONFLICT(iso2) DO NOTHING",
            params![
                location.country_iso2,
                location.country_name,
                location.timezone
            ],
        )?;
        Ok(written)
    }

    /// Stored `(name, timezone)` for an ISO2 code.
    pub fn country_details(&self, iso2: &str) -> DirectoryResult<Option<(String, Option<String>)>> {
        let details = self
            .conn
            .query_row(
                "SELECT name, timezone FROM countries WHERE iso2 = ?1",
                params![iso2],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(details)
    }

    pub fn country_count(&self) -> DirectoryResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM countries", [], |row| row.get(0))?;
        Ok(count)
    }
}
