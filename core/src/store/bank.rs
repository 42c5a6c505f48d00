use super::DirectoryStore;
use crate::{
    error::DirectoryResult,
    projector::BankRow,
    types::{BankId, CountryId, NewBank},
};
use rusqlite::{params, OptionalExtension, Row};

/// Identity and linkage of a stored bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankRef {
    pub id: BankId,
    pub is_headquarter: bool,
    pub parent_id: Option<BankId>,
}

const JOINED_SELECT: &str = r#"
    SELECT
        b.id,
        b.name AS "bankName",
        b.address,
        b.swift_code AS "swiftCode",
        b.is_headquarter AS "isHeadquarter",
        b.parent_id,
        c.name AS "countryName",
        c.iso2 AS "countryISO2"
    FROM banks b
    JOIN countries c ON b.country_id = c.id"#;

fn bank_row(row: &Row<'_>) -> rusqlite::Result<BankRow> {
    Ok(BankRow {
        id: row.get(0)?,
        bank_name: row.get(1)?,
        address: row.get(2)?,
        swift_code: row.get(3)?,
        is_headquarter: row.get::<_, i32>(4)? != 0,
        parent_id: row.get(5)?,
        country_name: row.get(6)?,
        country_iso2: row.get(7)?,
    })
}

impl DirectoryStore {
    // ── Banks: writes ─────────────────────────────────────────────

    pub fn insert_bank(
        &self,
        bank: &NewBank,
        country_id: CountryId,
        parent_id: Option<BankId>,
    ) -> DirectoryResult<BankId> {
        self.conn.execute(
            "INSERT INTO banks (name, address, swift_code, is_headquarter, country_id, parent_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                bank.bank_name,
                bank.address,
                bank.swift_code,
                if bank.is_headquarter { 1 } else { 0 },
                country_id,
                parent_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Point every parentless branch of `group_key` at `headquarter_id`.
    /// Branches that already have a parent are left alone.
    pub fn relink_orphaned_branches(
        &self,
        headquarter_id: BankId,
        group_key: &str,
    ) -> DirectoryResult<usize> {
        let updated = self.conn.execute(
            "UPDATE banks SET parent_id = ?1
             WHERE substr(swift_code, 1, 8) = ?2
               AND parent_id IS NULL
               AND is_headquarter = 0
               AND id <> ?1",
            params![headquarter_id, group_key],
        )?;
        Ok(updated)
    }

    /// Clear `parent_id` on every child of `parent_id`.
    pub fn detach_children(&self, parent_id: BankId) -> DirectoryResult<usize> {
        let updated = self.conn.execute(
            "UPDATE banks SET parent_id = NULL WHERE parent_id = ?1",
            params![parent_id],
        )?;
        Ok(updated)
    }

    pub fn delete_bank(&self, id: BankId) -> DirectoryResult<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM banks WHERE id = ?1", params![id])?;
        Ok(deleted)
    }

    // ── Banks: reads ──────────────────────────────────────────────

    pub fn bank_ref(&self, swift_code: &str) -> DirectoryResult<Option<BankRef>> {
        let found = self
            .conn
            .query_row(
                "SELECT id, is_headquarter, parent_id FROM banks WHERE swift_code = ?1",
                params![swift_code],
                |row| {
                    Ok(BankRef {
                        id: row.get(0)?,
                        is_headquarter: row.get::<_, i32>(1)? != 0,
                        parent_id: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(found)
    }

    pub fn bank_id(&self, swift_code: &str) -> DirectoryResult<Option<BankId>> {
        Ok(self.bank_ref(swift_code)?.map(|b| b.id))
    }

    /// The headquarters registered for an institution group, if any.
    pub fn headquarter_of_group(&self, group_key: &str) -> DirectoryResult<Option<BankId>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM banks
                 WHERE substr(swift_code, 1, 8) = ?1 AND is_headquarter = 1
                 ORDER BY id ASC LIMIT 1",
                params![group_key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Joined row for exactly `swift_code`.
    pub fn rows_by_code(&self, swift_code: &str) -> DirectoryResult<Vec<BankRow>> {
        let sql = format!("{JOINED_SELECT} WHERE b.swift_code = ?1 ORDER BY b.id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![swift_code], bank_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Joined rows for every bank of an institution group, in insertion order.
    pub fn rows_by_group_key(&self, group_key: &str) -> DirectoryResult<Vec<BankRow>> {
        let sql = format!(
            "{JOINED_SELECT} WHERE substr(b.swift_code, 1, 8) = ?1 ORDER BY b.id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![group_key], bank_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Joined rows for every bank of a country, in insertion order.
    pub fn rows_by_country(&self, iso2: &str) -> DirectoryResult<Vec<BankRow>> {
        let sql = format!("{JOINED_SELECT} WHERE c.iso2 = ?1 ORDER BY b.id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![iso2], bank_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn bank_count(&self) -> DirectoryResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM banks", [], |row| row.get(0))?;
        Ok(count)
    }
}
