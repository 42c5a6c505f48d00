//! File-backed store: data and links survive a reconnect.

use std::path::PathBuf;
use swiftdir_core::{
    directory::BankDirectory, projector::SwiftCodeDetails, registration::normalize,
    store::DirectoryStore,
};

fn scratch_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("swiftdir-{name}-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

/// A reopened connection sees the same banks, countries and parent links.
#[test]
fn reopened_store_keeps_hierarchy() {
    let path = scratch_db("reopen");
    let store = DirectoryStore::open(path.to_str().unwrap()).unwrap();
    store.migrate().unwrap();
    let dir = BankDirectory::new(store);
    for code in ["PKOPPLPWKRK", "PKOPPLPWXXX"] {
        let bank = normalize(code, "PKO", None, "PL", "POLAND", Some("Europe/Warsaw".into())).unwrap();
        dir.register_bank(&bank).unwrap();
    }

    let again = BankDirectory::new(dir.store().reopen().unwrap());
    drop(dir);

    let Some(SwiftCodeDetails::Headquarter(hq)) = again.bank_by_code("PKOPPLPWXXX").unwrap() else {
        panic!("expected headquarters after reopen");
    };
    assert_eq!(hq.branches.len(), 1);
    assert_eq!(hq.branches[0].address, None);
    let (_, timezone) = again.store().country_details("PL").unwrap().unwrap();
    assert_eq!(timezone.as_deref(), Some("Europe/Warsaw"));

    drop(again);
    let _ = std::fs::remove_file(&path);
}

/// Applying the schema twice is harmless.
#[test]
fn migrate_is_idempotent() {
    let store = DirectoryStore::in_memory().unwrap();
    store.migrate().unwrap();
    store.migrate().unwrap();
    assert_eq!(store.bank_count().unwrap(), 0);
}

/// An in-memory store cannot be shared: reopening it yields an empty one.
#[test]
fn reopened_in_memory_store_is_fresh() {
    let dir = BankDirectory::in_memory().unwrap();
    let bank = normalize("PKOPPLPWXXX", "PKO", None, "PL", "POLAND", None).unwrap();
    dir.register_bank(&bank).unwrap();

    let fresh = dir.store().reopen().unwrap();
    fresh.migrate().unwrap();

    assert_eq!(fresh.bank_count().unwrap(), 0);
    assert_eq!(dir.store().bank_count().unwrap(), 1);
}
