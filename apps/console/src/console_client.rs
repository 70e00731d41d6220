//! Chat client that plays one group chat on the terminal.

use std::collections::HashSet;
use std::io::Write;

use async_trait::async_trait;
use tagall_permissions::{ChatClient, OutgoingMessage, Participant, RoleInfo, TagallResult};

pub struct ConsoleChatClient {
    chat_id: String,
    admins: HashSet<String>,
    participants: Vec<Participant>,
    bot_admin: bool,
}

impl ConsoleChatClient {
    /// Admins are listed first in the participant order, followed by members.
    pub fn new(chat_id: String, admins: Vec<String>, members: Vec<String>, bot_admin: bool) -> Self {
        let mut seen = HashSet::new();
        let participants = admins
            .iter()
            .chain(members.iter())
            .filter(|id| seen.insert(id.to_string()))
            .map(Participant::new)
            .collect();

        Self {
            chat_id,
            admins: admins.into_iter().collect(),
            participants,
            bot_admin,
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    fn is_admin(&self, actor_id: &str) -> bool {
        self.admins.contains(actor_id)
    }
}

#[async_trait]
impl ChatClient for ConsoleChatClient {
    async fn resolve_roles(&self, chat_id: &str, actor_id: &str) -> TagallResult<RoleInfo> {
        let in_chat = chat_id == self.chat_id;
        Ok(RoleInfo {
            is_actor_admin: in_chat && self.is_admin(actor_id),
            is_bot_admin: in_chat && self.bot_admin,
        })
    }

    async fn fetch_group_participants(&self, chat_id: &str) -> TagallResult<Vec<Participant>> {
        if chat_id != self.chat_id {
            return Ok(Vec::new());
        }
        Ok(self.participants.clone())
    }

    async fn send_message(&self, chat_id: &str, message: OutgoingMessage) -> TagallResult<()> {
        let mut stdout = std::io::stdout().lock();
        let quoted = message
            .quoted_message_id
            .as_deref()
            .map(|id| format!(" (reply to {id})"))
            .unwrap_or_default();

        // Terminal output is best effort; a closed stdout is not a chat failure.
        let _ = writeln!(stdout, "[bot -> {chat_id}]{quoted}");
        for line in message.text.lines() {
            let _ = writeln!(stdout, "  {line}");
        }
        if !message.mentions.is_empty() {
            let _ = writeln!(stdout, "  mentions: {}", message.mentions.join(", "));
        }
        let _ = stdout.flush();
        Ok(())
    }
}
