//! Lookup Projector: reshapes joined `banks`/`countries` rows into the
//! three response shapes served to callers.
//!
//! Every projection is pure. `None` means "absent": a valid code or
//! country that simply has nothing registered.

use crate::types::BankId;
use serde::Serialize;

/// One `banks` row joined with its country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRow {
    pub id: BankId,
    pub bank_name: String,
    pub address: Option<String>,
    pub swift_code: String,
    pub is_headquarter: bool,
    pub parent_id: Option<BankId>,
    pub country_name: String,
    pub country_iso2: String,
}

/// Flat single-bank shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankDetails {
    pub address: Option<String>,
    #[serde(rename = "bankName")]
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarter: bool,
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
}

/// A bank nested under a headquarters or listed in a country roster.
/// Carries no country name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchEntry {
    pub address: Option<String>,
    #[serde(rename = "bankName")]
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "isHeadquarter")]
    pub is_headquarter: bool,
    #[serde(rename = "swiftCode")]
    pub swift_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadquarterDetails {
    #[serde(flatten)]
    pub bank: BankDetails,
    pub branches: Vec<BranchEntry>,
}

/// Result of a lookup by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SwiftCodeDetails {
    Branch(BankDetails),
    Headquarter(HeadquarterDetails),
}

impl SwiftCodeDetails {
    pub fn swift_code(&self) -> &str {
        match self {
            Self::Branch(b) => &b.swift_code,
            Self::Headquarter(h) => &h.bank.swift_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRoster {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    #[serde(rename = "countryName")]
    pub country_name: String,
    #[serde(rename = "swiftCodes")]
    pub swift_codes: Vec<BranchEntry>,
}

impl From<&BankRow> for BankDetails {
    fn from(row: &BankRow) -> Self {
        Self {
            address: row.address.clone(),
            bank_name: row.bank_name.clone(),
            country_iso2: row.country_iso2.clone(),
            country_name: row.country_name.clone(),
            is_headquarter: row.is_headquarter,
            swift_code: row.swift_code.clone(),
        }
    }
}

impl From<&BankRow> for BranchEntry {
    fn from(row: &BankRow) -> Self {
        Self {
            address: row.address.clone(),
            bank_name: row.bank_name.clone(),
            country_iso2: row.country_iso2.clone(),
            is_headquarter: row.is_headquarter,
            swift_code: row.swift_code.clone(),
        }
    }
}

/// Branch lookup: the first row, flattened.
pub fn project_branch(rows: &[BankRow]) -> Option<BankDetails> {
    rows.first().map(BankDetails::from)
}

/// Headquarters lookup over every row of one institution group.
///
/// The headquarters-flagged row carrying `swift_code` becomes the root;
/// rows whose `parent_id` is the root become its branches, in row order.
/// With no such headquarters row the group is treated as absent.
pub fn project_headquarter(rows: &[BankRow], swift_code: &str) -> Option<HeadquarterDetails> {
    let root = rows
        .iter()
        .find(|r| r.is_headquarter && r.swift_code == swift_code)?;
    let branches = rows
        .iter()
        .filter(|r| r.parent_id == Some(root.id))
        .map(BranchEntry::from)
        .collect();
    Some(HeadquarterDetails {
        bank: BankDetails::from(root),
        branches,
    })
}

/// Country roster; an empty row set is absent, not an empty roster.
pub fn project_country(rows: &[BankRow]) -> Option<CountryRoster> {
    let first = rows.first()?;
    Some(CountryRoster {
        country_iso2: first.country_iso2.clone(),
        country_name: first.country_name.clone(),
        swift_codes: rows.iter().map(BranchEntry::from).collect(),
    })
}
