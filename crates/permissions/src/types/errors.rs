//! Error types for the tagall permission system.

use std::fmt;

use thiserror::Error;

use crate::entities::ManageScope;

/// Result type alias for tagall operations
pub type TagallResult<T> = Result<T, TagallError>;

/// What the refused caller was trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedAction {
    Broadcast,
    Manage(ManageScope),
}

impl fmt::Display for RequestedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestedAction::Broadcast => write!(f, "broadcast"),
            RequestedAction::Manage(ManageScope::Group) => write!(f, "manage group tagall setting"),
            RequestedAction::Manage(ManageScope::Global) => write!(f, "manage global tagall override"),
        }
    }
}

/// Main error type for the tagall permission system
#[derive(Debug, Error)]
pub enum TagallError {
    #[error("Permission store unreadable: {reason}")]
    StoreUnreadable { reason: String },

    #[error("Permission store write failed: {reason}")]
    StoreWriteFailed { reason: String },

    #[error("Insufficient privilege to {action}")]
    InsufficientPrivilege { action: RequestedAction },

    #[error("Bot is not an admin in chat {chat_id}")]
    BotNotElevated { chat_id: String },

    #[error("No participants found in chat {chat_id}")]
    EmptyParticipantSet { chat_id: String },

    #[error("Chat client error: {message}")]
    Client { message: String },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TagallError {
    /// Create an unreadable store error
    pub fn store_unreadable(reason: impl Into<String>) -> Self {
        Self::StoreUnreadable {
            reason: reason.into(),
        }
    }

    /// Create a failed store write error
    pub fn store_write_failed(reason: impl Into<String>) -> Self {
        Self::StoreWriteFailed {
            reason: reason.into(),
        }
    }

    /// Create a privilege error for the given action
    pub fn insufficient_privilege(action: RequestedAction) -> Self {
        Self::InsufficientPrivilege { action }
    }

    /// Create a bot-not-admin error
    pub fn bot_not_elevated(chat_id: impl Into<String>) -> Self {
        Self::BotNotElevated {
            chat_id: chat_id.into(),
        }
    }

    /// Create an empty participant list error
    pub fn empty_participant_set(chat_id: impl Into<String>) -> Self {
        Self::EmptyParticipantSet {
            chat_id: chat_id.into(),
        }
    }

    /// Create a chat client error
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TagallError::insufficient_privilege(RequestedAction::Manage(ManageScope::Global));
        assert_eq!(
            err.to_string(),
            "Insufficient privilege to manage global tagall override"
        );

        let err = TagallError::bot_not_elevated("group@g.us");
        assert_eq!(err.to_string(), "Bot is not an admin in chat group@g.us");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TagallError = json_err.into();
        assert!(matches!(err, TagallError::Serialization(_)));
    }
}
