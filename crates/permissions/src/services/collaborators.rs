//! Seams to the chat platform.

use async_trait::async_trait;

use crate::entities::{OutgoingMessage, Participant, RoleInfo};
use crate::types::TagallResult;

/// Chat platform operations the command service relies on
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Admin status of the actor and of the bot itself in the chat
    async fn resolve_roles(&self, chat_id: &str, actor_id: &str) -> TagallResult<RoleInfo>;

    /// Current members of the group, in platform order
    async fn fetch_group_participants(&self, chat_id: &str) -> TagallResult<Vec<Participant>>;

    async fn send_message(&self, chat_id: &str, message: OutgoingMessage) -> TagallResult<()>;
}

/// Decides whether an account is the bot owner or a sudo user
#[async_trait]
pub trait OwnerResolver: Send + Sync {
    async fn is_owner_or_sudo(&self, actor_id: &str) -> bool;
}
