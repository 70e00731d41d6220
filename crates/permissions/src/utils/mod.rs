//! Internal utilities for the tagall permission system.

pub mod permissions;

// Re-export utilities
pub use permissions::*;
