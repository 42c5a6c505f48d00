//! Registration payload and its normalization into a [`NewBank`].

use crate::{
    classifier,
    error::{DirectoryError, DirectoryResult},
    types::{Location, NewBank},
};
use serde::Deserialize;

/// Body of `POST /v1/swift-codes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRegistration {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

impl BankRegistration {
    pub fn into_new_bank(self) -> DirectoryResult<NewBank> {
        let claimed = self.is_headquarter;
        let bank = normalize(
            &self.swift_code,
            &self.bank_name,
            Some(self.address),
            &self.country_iso2,
            &self.country_name,
            None,
        )?;
        if bank.is_headquarter != claimed {
            log::warn!(
                "{}: isHeadquarter={claimed} ignored, role derived from code is {}",
                bank.swift_code,
                if bank.is_headquarter { "headquarter" } else { "branch" }
            );
        }
        Ok(bank)
    }
}

/// Shared normalization for API registrations and spreadsheet rows.
///
/// Code, bank name and country fields are trimmed; ISO2 and country name
/// are upper-cased; the address is kept as given.
pub fn normalize(
    swift_code: &str,
    bank_name: &str,
    address: Option<String>,
    country_iso2: &str,
    country_name: &str,
    timezone: Option<String>,
) -> DirectoryResult<NewBank> {
    let swift_code = swift_code.trim();
    classifier::validate_swift_code(swift_code)?;

    let bank_name = bank_name.trim();
    if bank_name.is_empty() {
        return Err(DirectoryError::validation("bankName", "must not be empty"));
    }

    let country_iso2 = country_iso2.trim().to_uppercase();
    if country_iso2.len() != 2 || !country_iso2.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DirectoryError::validation(
            "countryISO2",
            format!("expected a 2-letter country code, got '{country_iso2}'"),
        ));
    }

    let country_name = country_name.trim().to_uppercase();
    if country_name.is_empty() {
        return Err(DirectoryError::validation("countryName", "must not be empty"));
    }

    let is_headquarter = classifier::classify(swift_code)
        .map(|c| c.is_headquarter)
        .unwrap_or(false);

    Ok(NewBank {
        swift_code: swift_code.to_string(),
        bank_name: bank_name.to_string(),
        address,
        is_headquarter,
        location: Location {
            country_iso2,
            country_name,
            timezone: timezone.filter(|tz| !tz.trim().is_empty()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn registration(code: &str) -> BankRegistration {
        BankRegistration {
            address: "X".into(),
            bank_name: " New Bank ".into(),
            country_iso2: "pl".into(),
            country_name: "poland".into(),
            is_headquarter: true,
            swift_code: code.into(),
        }
    }

    #[test]
    fn registration_is_normalized() {
        let bank = registration("NEWPL00AXXX").into_new_bank().unwrap();
        assert_eq!(bank.bank_name, "New Bank");
        assert_eq!(bank.location.country_iso2, "PL");
        assert_eq!(bank.location.country_name, "POLAND");
        assert_eq!(bank.address.as_deref(), Some("X"));
        assert!(bank.is_headquarter);
        assert_eq!(bank.location.timezone, None);
    }

    #[test]
    fn role_comes_from_the_code() {
        let bank = registration("NEWPL00AKRK").into_new_bank().unwrap();
        assert!(!bank.is_headquarter);
    }

    #[test]
    fn bad_fields_are_validation_errors() {
        let mut bad_iso = registration("NEWPL00AXXX");
        bad_iso.country_iso2 = "POL".into();
        assert_eq!(bad_iso.into_new_bank().unwrap_err().kind(), ErrorKind::Validation);

        let mut blank_name = registration("NEWPL00AXXX");
        blank_name.bank_name = "   ".into();
        assert_eq!(blank_name.into_new_bank().unwrap_err().kind(), ErrorKind::Validation);

        let short = registration("NEWPL");
        assert_eq!(short.into_new_bank().unwrap_err().kind(), ErrorKind::Validation);
    }
}
