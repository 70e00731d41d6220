//! Handler for the `.tagall` command family.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::broadcast::BroadcastTemplate;
use super::collaborators::{ChatClient, OwnerResolver};
use crate::entities::{ActorRole, InboundMessage, ManageScope, OutgoingMessage, PolicyState};
use crate::repositories::PermissionStore;
use crate::types::{
    CommandOutcome, FlagAction, RequestedAction, TagallCommand, TagallError, TagallResult,
};
use crate::utils::AccessDecision;

/// User-facing reply texts
pub mod replies {
    pub const BOT_NOT_ADMIN: &str = "⚠️ Please make the bot an admin first.";
    pub const GLOBAL_OWNER_ONLY: &str = "❌ Only bot owner can manage the global tagall override.";
    pub const GROUP_ADMINS_ONLY: &str =
        "❌ Only group admins or bot owner can manage tagall permissions for this group.";
    pub const BROADCAST_DISABLED: &str =
        "❌ Tagall is currently disabled for regular members. Ask an admin to enable it with: .tagall on";
    pub const NO_PARTICIPANTS: &str = "❌ No participants found in the group.";
    pub const WRITE_FAILED: &str = "❌ Failed to update tagall setting. Please try again.";
    pub const GENERIC_FAILURE: &str = "❌ Failed to tag all members.";

    pub const GROUP_ENABLED: &str =
        "✅ Tagall enabled for all members in this group (bot must be admin).";
    pub const GROUP_DISABLED: &str =
        "🔒 Tagall disabled for regular members. Only admins and bot owner can use .tagall now.";
    pub const GLOBAL_ENABLED: &str =
        "✅ Global tagall override enabled. Anyone can use .tagall in any group (bot must be admin).";
    pub const GLOBAL_DISABLED: &str =
        "🔒 Global tagall override disabled. Group-level permissions now apply.";

    pub fn global_status(enabled: bool) -> String {
        format!(
            "📊 Global Tagall Override: {}",
            if enabled { "✅ Enabled" } else { "🔒 Disabled" }
        )
    }

    pub fn group_status(group_enabled: bool, global_enabled: bool) -> String {
        format!(
            "📊 *Tagall Status*\nGroup: {}\nGlobal override: {}\n\nUsage:\n.tagall on - enable all\n.tagall off - admins only\n.tagall global on/off - owner override",
            if group_enabled { "✅ Enabled for all" } else { "🔒 Admins only" },
            if global_enabled { "✅ Enabled" } else { "🔒 Disabled" },
        )
    }
}

/// Service for the `.tagall` command
pub struct TagallService {
    store: Arc<dyn PermissionStore>,
    client: Arc<dyn ChatClient>,
    owners: Arc<dyn OwnerResolver>,
    template: BroadcastTemplate,
}

impl TagallService {
    /// Create a new tagall service instance
    pub fn new(
        store: Arc<dyn PermissionStore>,
        client: Arc<dyn ChatClient>,
        owners: Arc<dyn OwnerResolver>,
        template: BroadcastTemplate,
    ) -> Self {
        Self {
            store,
            client,
            owners,
            template,
        }
    }

    /// Handle one inbound message.
    ///
    /// Returns `None` when the message is not a `.tagall` command. Otherwise a
    /// reply has been sent and the outcome describes what happened.
    pub async fn handle(&self, message: &InboundMessage) -> Option<CommandOutcome> {
        let command = TagallCommand::parse(&message.text)?;
        debug!(
            chat_id = %message.chat_id,
            sender_id = %message.sender_id,
            ?command,
            mutation = command.is_mutation(),
            "handling tagall command"
        );

        let outcome = match self.dispatch(message, command).await {
            Ok(outcome) => outcome,
            Err(error) => {
                self.report_error(message, &error).await;
                CommandOutcome::Refused(error)
            }
        };

        Some(outcome)
    }

    /// Effective policy for a group as currently stored
    pub async fn policy_state(&self, chat_id: &str) -> PolicyState {
        let group_flag = self.store.get_group_flag(chat_id).await;
        let global_flag = self.store.get_global_flag().await;
        PolicyState::from_flags(group_flag, global_flag)
    }

    async fn dispatch(
        &self,
        message: &InboundMessage,
        command: TagallCommand,
    ) -> TagallResult<CommandOutcome> {
        let roles = self
            .client
            .resolve_roles(&message.chat_id, &message.sender_id)
            .await?;

        if !roles.is_bot_admin {
            return Err(TagallError::bot_not_elevated(&message.chat_id));
        }

        let is_owner = self.owners.is_owner_or_sudo(&message.sender_id).await;
        let role = ActorRole::resolve(is_owner, roles.is_actor_admin);

        match command {
            TagallCommand::Broadcast => self.broadcast(message, role).await,
            TagallCommand::Group(FlagAction::Status) => self.report_group_status(message).await,
            TagallCommand::Group(action) => {
                AccessDecision::check_manage(role, ManageScope::Group)?;
                self.update_group_flag(message, action == FlagAction::Enable)
                    .await
            }
            TagallCommand::Global(FlagAction::Status) => self.report_global_status(message).await,
            TagallCommand::Global(action) => {
                AccessDecision::check_manage(role, ManageScope::Global)?;
                self.update_global_flag(message, action == FlagAction::Enable)
                    .await
            }
            TagallCommand::GlobalUnrecognized => {
                AccessDecision::check_manage(role, ManageScope::Global)?;
                self.broadcast(message, role).await
            }
            TagallCommand::Unrecognized => {
                AccessDecision::check_manage(role, ManageScope::Group)?;
                self.broadcast(message, role).await
            }
        }
    }

    async fn broadcast(
        &self,
        message: &InboundMessage,
        role: ActorRole,
    ) -> TagallResult<CommandOutcome> {
        let group_flag = self.store.get_group_flag(&message.chat_id).await;
        let global_flag = self.store.get_global_flag().await;

        AccessDecision::check_broadcast(role, group_flag, global_flag)?;

        let participants = self
            .client
            .fetch_group_participants(&message.chat_id)
            .await?;

        if participants.is_empty() {
            return Err(TagallError::empty_participant_set(&message.chat_id));
        }

        let outgoing = self.template.compose(&participants);
        self.client.send_message(&message.chat_id, outgoing).await?;

        info!(
            chat_id = %message.chat_id,
            sender_id = %message.sender_id,
            ?role,
            mentioned = participants.len(),
            "tagall broadcast sent"
        );

        Ok(CommandOutcome::Broadcast {
            mentioned: participants.len(),
        })
    }

    async fn update_group_flag(
        &self,
        message: &InboundMessage,
        enabled: bool,
    ) -> TagallResult<CommandOutcome> {
        if !self.store.set_group_flag(&message.chat_id, enabled).await {
            return Err(TagallError::store_write_failed(format!(
                "group flag for {} was not persisted",
                message.chat_id
            )));
        }

        let text = if enabled {
            replies::GROUP_ENABLED
        } else {
            replies::GROUP_DISABLED
        };
        self.confirm(message, text).await;

        Ok(CommandOutcome::GroupFlagUpdated { enabled })
    }

    async fn update_global_flag(
        &self,
        message: &InboundMessage,
        enabled: bool,
    ) -> TagallResult<CommandOutcome> {
        if !self.store.set_global_flag(enabled).await {
            return Err(TagallError::store_write_failed(
                "global flag was not persisted",
            ));
        }

        let text = if enabled {
            replies::GLOBAL_ENABLED
        } else {
            replies::GLOBAL_DISABLED
        };
        self.confirm(message, text).await;

        Ok(CommandOutcome::GlobalFlagUpdated { enabled })
    }

    async fn report_group_status(&self, message: &InboundMessage) -> TagallResult<CommandOutcome> {
        let group_enabled = self.store.get_group_flag(&message.chat_id).await;
        let global_enabled = self.store.get_global_flag().await;

        self.reply(message, replies::group_status(group_enabled, global_enabled))
            .await?;

        Ok(CommandOutcome::GroupStatus {
            state: PolicyState::from_flags(group_enabled, global_enabled),
            group_enabled,
            global_enabled,
        })
    }

    async fn report_global_status(&self, message: &InboundMessage) -> TagallResult<CommandOutcome> {
        let enabled = self.store.get_global_flag().await;
        self.reply(message, replies::global_status(enabled)).await?;
        Ok(CommandOutcome::GlobalStatus { enabled })
    }

    async fn reply(&self, message: &InboundMessage, text: impl Into<String>) -> TagallResult<()> {
        self.client
            .send_message(&message.chat_id, OutgoingMessage::reply_to(message, text))
            .await
    }

    /// Send the confirmation for a change that is already persisted.
    ///
    /// A delivery failure is logged only, so the outcome still reports the
    /// stored state.
    async fn confirm(&self, message: &InboundMessage, text: &str) {
        if let Err(error) = self.reply(message, text).await {
            warn!(
                chat_id = %message.chat_id,
                sender_id = %message.sender_id,
                %error,
                "tagall setting persisted but confirmation was not delivered"
            );
        }
    }

    /// Turn a refusal or failure into the reply the requester sees
    async fn report_error(&self, message: &InboundMessage, error: &TagallError) {
        let outgoing = match error {
            TagallError::BotNotElevated { .. } => {
                OutgoingMessage::reply_to(message, replies::BOT_NOT_ADMIN)
            }
            TagallError::InsufficientPrivilege { action } => {
                let text = match action {
                    RequestedAction::Broadcast => replies::BROADCAST_DISABLED,
                    RequestedAction::Manage(ManageScope::Group) => replies::GROUP_ADMINS_ONLY,
                    RequestedAction::Manage(ManageScope::Global) => replies::GLOBAL_OWNER_ONLY,
                };
                OutgoingMessage::reply_to(message, text)
            }
            TagallError::StoreWriteFailed { .. } => {
                OutgoingMessage::reply_to(message, replies::WRITE_FAILED)
            }
            TagallError::EmptyParticipantSet { .. } => {
                OutgoingMessage::text(replies::NO_PARTICIPANTS)
            }
            TagallError::StoreUnreadable { .. }
            | TagallError::Client { .. }
            | TagallError::Serialization(_) => OutgoingMessage::text(replies::GENERIC_FAILURE),
        };

        match error {
            TagallError::InsufficientPrivilege { .. } | TagallError::BotNotElevated { .. } => {
                info!(chat_id = %message.chat_id, sender_id = %message.sender_id, %error, "tagall command refused");
            }
            _ => {
                warn!(chat_id = %message.chat_id, sender_id = %message.sender_id, %error, "tagall command failed");
            }
        }

        if let Err(send_error) = self.client.send_message(&message.chat_id, outgoing).await {
            warn!(chat_id = %message.chat_id, error = %send_error, "failed to deliver tagall reply");
        }
    }
}
