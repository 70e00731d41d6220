//! Recording chat client for exercising the command service without a
//! chat platform.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entities::{OutgoingMessage, Participant, RoleInfo};
use crate::services::ChatClient;
use crate::types::{TagallError, TagallResult};

/// Fake chat platform: admins and participants are configured up front and
/// every sent message is recorded.
#[derive(Debug, Clone)]
pub struct RecordingChatClient {
    admins: Arc<RwLock<HashSet<(String, String)>>>,
    participants: Arc<RwLock<HashMap<String, Vec<Participant>>>>,
    sent: Arc<RwLock<Vec<(String, OutgoingMessage)>>>,
    bot_admin: Arc<AtomicBool>,
    fail_lookups: Arc<AtomicBool>,
    fail_sends: Arc<AtomicBool>,
}

impl RecordingChatClient {
    /// Client where the bot is an admin everywhere and no groups exist yet
    pub fn new() -> Self {
        Self {
            admins: Arc::new(RwLock::new(HashSet::new())),
            participants: Arc::new(RwLock::new(HashMap::new())),
            sent: Arc::new(RwLock::new(Vec::new())),
            bot_admin: Arc::new(AtomicBool::new(true)),
            fail_lookups: Arc::new(AtomicBool::new(false)),
            fail_sends: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn add_admin(&self, chat_id: &str, actor_id: &str) {
        self.admins
            .write()
            .await
            .insert((chat_id.to_string(), actor_id.to_string()));
    }

    pub async fn set_participants<I, S>(&self, chat_id: &str, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = ids.into_iter().map(Participant::new).collect();
        self.participants
            .write()
            .await
            .insert(chat_id.to_string(), members);
    }

    pub fn set_bot_admin(&self, is_admin: bool) {
        self.bot_admin.store(is_admin, Ordering::SeqCst);
    }

    /// Make role and participant lookups fail
    pub fn set_fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Make every outgoing message fail without being recorded
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// All messages sent so far, with their target chat
    pub async fn sent_messages(&self) -> Vec<(String, OutgoingMessage)> {
        self.sent.read().await.clone()
    }

    pub async fn last_message(&self) -> Option<OutgoingMessage> {
        self.sent
            .read()
            .await
            .last()
            .map(|(_, message)| message.clone())
    }

    fn check_lookups(&self) -> TagallResult<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(TagallError::client("simulated lookup failure"));
        }
        Ok(())
    }
}

impl Default for RecordingChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for RecordingChatClient {
    async fn resolve_roles(&self, chat_id: &str, actor_id: &str) -> TagallResult<RoleInfo> {
        self.check_lookups()?;
        let is_actor_admin = self
            .admins
            .read()
            .await
            .contains(&(chat_id.to_string(), actor_id.to_string()));

        Ok(RoleInfo {
            is_actor_admin,
            is_bot_admin: self.bot_admin.load(Ordering::SeqCst),
        })
    }

    async fn fetch_group_participants(&self, chat_id: &str) -> TagallResult<Vec<Participant>> {
        self.check_lookups()?;
        Ok(self
            .participants
            .read()
            .await
            .get(chat_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_message(&self, chat_id: &str, message: OutgoingMessage) -> TagallResult<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TagallError::client("simulated send failure"));
        }
        self.sent.write().await.push((chat_id.to_string(), message));
        Ok(())
    }
}
