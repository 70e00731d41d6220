//! Shared types for the tagall permission system.
//!
//! This module contains the error taxonomy, the typed form of a parsed
//! `.tagall` command, and the outcome reported after handling one.

pub mod command;
pub mod errors;
pub mod outcome;

// Re-export common types
pub use command::{FlagAction, TagallCommand};
pub use errors::{RequestedAction, TagallError, TagallResult};
pub use outcome::CommandOutcome;
