//! Location Resolver: maps an ISO2 code to a `countries` row, creating the
//! row the first time a bank references it.
//!
//! First write wins. Name and timezone of an existing country are never
//! updated, even when a later caller supplies different values.

use crate::{
    error::{DirectoryError, DirectoryResult},
    store::DirectoryStore,
    types::{CountryId, Location},
};

pub fn resolve_country(store: &DirectoryStore, location: &Location) -> DirectoryResult<CountryId> {
    if let Some(id) = store.country_id_by_iso2(&location.country_iso2)? {
        return Ok(id);
    }

    // The unique index on iso2 decides between concurrent creators.
    if store.insert_country_if_absent(location)? == 0 {
        log::debug!(
            "country {} was created concurrently; reusing existing row",
            location.country_iso2
        );
    } else {
        log::info!(
            "country created: {} ({})",
            location.country_iso2,
            location.country_name
        );
    }

    store
        .country_id_by_iso2(&location.country_iso2)?
        .ok_or_else(|| {
            DirectoryError::Other(anyhow::anyhow!(
                "country {} missing after insert",
                location.country_iso2
            ))
        })
}
