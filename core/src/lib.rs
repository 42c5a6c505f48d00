//! SWIFT/BIC bank directory.
//!
//! Stores institutions, their headquarters/branch hierarchy and country
//! metadata in SQLite and serves lookup, registration and removal over HTTP.

pub mod api;
pub mod classifier;
pub mod config;
pub mod directory;
pub mod error;
pub mod hierarchy;
pub mod import;
pub mod location;
pub mod projector;
pub mod registration;
pub mod store;
pub mod types;
