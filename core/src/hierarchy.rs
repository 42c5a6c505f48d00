//! Hierarchy Reconciler: keeps headquarters → branch links consistent no
//! matter in which order records arrive or leave.
//!
//! Insert-time:
//!   - headquarters are stored parentless, then adopt every parentless
//!     branch of their institution group;
//!   - branches bind to their group's headquarters if it already exists,
//!     otherwise stay parentless until it arrives.
//! Delete-time:
//!   - children of the removed record are orphaned, never deleted.
//!
//! A branch that already has a parent is never re-pointed. Each sequence
//! runs in one store transaction.

use crate::{
    classifier::{self, CodeClass},
    error::{DirectoryError, DirectoryResult},
    location,
    store::{self, DirectoryStore},
    types::{BankId, NewBank},
};

/// Register a classified, validated bank and reconcile its group.
pub fn register_bank(store: &DirectoryStore, bank: &NewBank) -> DirectoryResult<BankId> {
    let class = classifier::classify(&bank.swift_code).ok_or_else(|| {
        DirectoryError::validation("swiftCode", "too short to carry an institution-group key")
    })?;

    store
        .in_transaction(|store| insert_reconciled(store, bank, class))
        .map_err(|e| {
            if store::is_unique_violation(&e) {
                DirectoryError::Duplicate { swift_code: bank.swift_code.clone() }
            } else {
                e
            }
        })
}

fn insert_reconciled(
    store: &DirectoryStore,
    bank: &NewBank,
    class: CodeClass<'_>,
) -> DirectoryResult<BankId> {
    let country_id = location::resolve_country(store, &bank.location)?;

    if store.bank_id(&bank.swift_code)?.is_some() {
        log::debug!("bank already exists: {}", bank.swift_code);
        return Err(DirectoryError::Duplicate { swift_code: bank.swift_code.clone() });
    }

    if class.is_headquarter {
        let id = store.insert_bank(bank, country_id, None)?;
        let adopted = store.relink_orphaned_branches(id, class.group_key)?;
        log::info!(
            "headquarter registered: {} (adopted {adopted} branches)",
            bank.swift_code
        );
        return Ok(id);
    }

    let parent_id = store.headquarter_of_group(class.group_key)?;
    let id = store.insert_bank(bank, country_id, parent_id)?;
    match parent_id {
        Some(_) => log::info!("branch registered: {}", bank.swift_code),
        None => log::info!(
            "branch registered without headquarter: {} (group {})",
            bank.swift_code,
            class.group_key
        ),
    }
    Ok(id)
}

/// Remove a bank by code, orphaning its children.
pub fn remove_bank(store: &DirectoryStore, swift_code: &str) -> DirectoryResult<()> {
    store.in_transaction(|store| {
        let id = store
            .bank_id(swift_code)?
            .ok_or_else(|| DirectoryError::NotFound { swift_code: swift_code.to_string() })?;

        let orphaned = store.detach_children(id)?;
        log::debug!("{swift_code}: cleared parent on {orphaned} banks");

        if store.delete_bank(id)? != 1 {
            return Err(DirectoryError::DeleteRace { swift_code: swift_code.to_string() });
        }
        log::info!("bank removed: {swift_code}");
        Ok(())
    })
}
