//! # Tagall Permissions Crate
//!
//! This crate decides who may run the `.tagall` broadcast in a group chat and
//! persists the flags backing that decision.
//!
//! ## Architecture
//!
//! - **Entities**: Roles, scopes, policy states, participants and messages
//! - **Repositories**: The shared permission document and its stores
//! - **Services**: The `.tagall` command handler and its collaborator traits
//! - **Types**: Errors, parsed commands and command outcomes
//! - **Utils**: Access decision predicates
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tagall_permissions::{JsonFilePermissionStore, TagallService};
//!
//! let store = Arc::new(JsonFilePermissionStore::new("data/userGroupData.json"));
//! let service = TagallService::new(store, client, owners, template);
//! let outcome = service.handle(&message).await;
//! ```

pub mod entities;
pub mod repositories;
pub mod services;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use entities::{
    ActorRole, InboundMessage, ManageScope, OutgoingMessage, Participant, PolicyState, RoleInfo,
};
pub use repositories::{
    DocumentBackend, InMemoryPermissionStore, JsonFilePermissionStore, PermissionDocument,
    PermissionStore,
};
pub use services::{
    BroadcastTemplate, ChatClient, ConfiguredOwners, OwnerResolver, TagallService,
};
pub use types::{
    CommandOutcome, FlagAction, RequestedAction, TagallCommand, TagallError, TagallResult,
};
pub use utils::AccessDecision;
