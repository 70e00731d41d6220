use serde::{Deserialize, Serialize};

/// A text message received in a group chat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboundMessage {
    /// Chat the message was posted in
    pub chat_id: String,
    /// Account that sent the message
    pub sender_id: String,
    /// Platform identifier of the message, used when quoting it in replies
    pub message_id: String,
    /// Raw message text
    pub text: String,
}

impl InboundMessage {
    pub fn new(
        chat_id: impl Into<String>,
        sender_id: impl Into<String>,
        message_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender_id: sender_id.into(),
            message_id: message_id.into(),
            text: text.into(),
        }
    }
}

/// A message the bot sends back to the chat
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutgoingMessage {
    pub text: String,
    /// Accounts explicitly mentioned by the message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
    /// Message being replied to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_message_id: Option<String>,
}

impl OutgoingMessage {
    /// Plain text message without mentions or quote
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Reply quoting the given inbound message
    pub fn reply_to(message: &InboundMessage, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mentions: Vec::new(),
            quoted_message_id: Some(message.message_id.clone()),
        }
    }
}

/// A member of a group chat as reported by the chat client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
}

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The part of the identifier before the `@` server suffix
    pub fn handle(&self) -> &str {
        local_part(&self.id)
    }
}

/// Privilege lookups for one actor in one chat
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleInfo {
    pub is_actor_admin: bool,
    pub is_bot_admin: bool,
}

/// Strip the `@server` suffix from an account identifier
pub(crate) fn local_part(id: &str) -> &str {
    id.split('@').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_handle_strips_server() {
        assert_eq!(Participant::new("2348012345678@s.whatsapp.net").handle(), "2348012345678");
        assert_eq!(Participant::new("plain-id").handle(), "plain-id");
        assert_eq!(Participant::new("").handle(), "");
    }

    #[test]
    fn test_reply_quotes_inbound_message() {
        let inbound = InboundMessage::new("group@g.us", "user@s.whatsapp.net", "MSG1", ".tagall");
        let reply = OutgoingMessage::reply_to(&inbound, "hello");

        assert_eq!(reply.text, "hello");
        assert!(reply.mentions.is_empty());
        assert_eq!(reply.quoted_message_id.as_deref(), Some("MSG1"));

        let plain = OutgoingMessage::text("bare");
        assert!(plain.quoted_message_id.is_none());
    }
}
