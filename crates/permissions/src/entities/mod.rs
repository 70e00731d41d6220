//! Domain entities for the tagall permission system.
//!
//! Roles and policy states are derived per invocation and never stored;
//! messages and participants describe what flows through the chat client.

pub mod message;
pub mod role;

// Re-export all entity types
pub use message::{InboundMessage, OutgoingMessage, Participant, RoleInfo};
pub use role::{ActorRole, ManageScope, PolicyState};
