//! Shared primitive types used across the directory.

/// Row identifier of a `banks` record.
pub type BankId = i64;

/// Row identifier of a `countries` record.
pub type CountryId = i64;

/// Country metadata carried alongside a bank on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Upper-case ISO 3166-1 alpha-2 code.
    pub country_iso2: String,
    pub country_name: String,
    /// Only the spreadsheet import knows the time zone.
    pub timezone: Option<String>,
}

/// A normalized, validated bank ready for insert-time reconciliation.
///
/// `is_headquarter` is always derived from `swift_code`, never taken from
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBank {
    pub swift_code: String,
    pub bank_name: String,
    pub address: Option<String>,
    pub is_headquarter: bool,
    pub location: Location,
}
