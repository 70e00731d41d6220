use tagall_config::BotConfig;

use crate::entities::{OutgoingMessage, Participant};

/// Renders the message that mentions every participant
#[derive(Debug, Clone)]
pub struct BroadcastTemplate {
    bot_name: String,
    website: String,
}

impl BroadcastTemplate {
    pub fn new(bot_name: impl Into<String>, website: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            website: website.into(),
        }
    }

    pub fn from_bot_config(config: &BotConfig) -> Self {
        Self::new(config.name.clone(), config.website.clone())
    }

    /// One `@handle` line per participant; mentions carry the full identifiers in order.
    pub fn compose(&self, participants: &[Participant]) -> OutgoingMessage {
        let mut text = String::from("📢 *Attention Everyone!*\n\n");
        for participant in participants {
            text.push('@');
            text.push_str(participant.handle());
            text.push('\n');
        }
        text.push_str(&format!(
            "\n_Powered by {}_\n🌐 {}",
            self.bot_name, self.website
        ));

        OutgoingMessage {
            text,
            mentions: participants.iter().map(|p| p.id.clone()).collect(),
            quoted_message_id: None,
        }
    }
}

impl Default for BroadcastTemplate {
    fn default() -> Self {
        Self::from_bot_config(&BotConfig::default())
    }
}
