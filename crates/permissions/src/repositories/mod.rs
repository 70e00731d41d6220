//! Persistence for the tagall permission flags.
//!
//! All flags live in one shared JSON document that other features also
//! write to. Stores load the whole document, merge one key and write it back;
//! concurrent writers race and the last one wins.

pub mod json_file_store;
pub mod memory_store;
pub mod permission_store;

// Re-export all repositories
pub use json_file_store::JsonFilePermissionStore;
pub use memory_store::InMemoryPermissionStore;
pub use permission_store::{
    DocumentBackend, PermissionDocument, PermissionStore, GLOBAL_FLAG_KEY, GROUP_FLAGS_KEY,
};
