use crate::entities::PolicyState;
use crate::types::TagallError;

/// What handling a `.tagall` command resulted in.
///
/// Every variant has already been reported to the chat by the time it is
/// returned; refusals carry the error that produced the reply.
#[derive(Debug)]
pub enum CommandOutcome {
    Broadcast { mentioned: usize },
    GroupFlagUpdated { enabled: bool },
    GlobalFlagUpdated { enabled: bool },
    GroupStatus { state: PolicyState, group_enabled: bool, global_enabled: bool },
    GlobalStatus { enabled: bool },
    Refused(TagallError),
}

impl CommandOutcome {
    pub fn is_refused(&self) -> bool {
        matches!(self, CommandOutcome::Refused(_))
    }
}
