use std::collections::HashSet;

use async_trait::async_trait;
use tagall_config::BotConfig;

use super::collaborators::OwnerResolver;
use crate::entities::message::local_part;

/// Owner lookup against the configured owner and sudo identifiers.
///
/// Identifiers are compared by their local part, so a configured phone
/// number matches the full platform identifier.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredOwners {
    ids: HashSet<String>,
}

impl ConfiguredOwners {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(|id| local_part(id.as_ref().trim()).to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }

    /// Owners and sudo users from the bot configuration
    pub fn from_bot_config(config: &BotConfig) -> Self {
        Self::new(config.owner_ids.iter().chain(config.sudo_ids.iter()))
    }

    pub fn contains(&self, actor_id: &str) -> bool {
        self.ids.contains(local_part(actor_id))
    }
}

#[async_trait]
impl OwnerResolver for ConfiguredOwners {
    async fn is_owner_or_sudo(&self, actor_id: &str) -> bool {
        self.contains(actor_id)
    }
}
