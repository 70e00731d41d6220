//! Business logic services for the `.tagall` command.
//!
//! The command service coordinates the permission store with the chat client
//! collaborators and turns every outcome into a reply.

pub mod broadcast;
pub mod collaborators;
pub mod owner_resolver;
pub mod tagall_service;

// Re-export all services
pub use broadcast::BroadcastTemplate;
pub use collaborators::{ChatClient, OwnerResolver};
pub use owner_resolver::ConfiguredOwners;
pub use tagall_service::{replies, TagallService};
