//! Typed form of the textual `.tagall` command.

const COMMAND_TOKEN: &str = ".tagall";
const GLOBAL_TOKEN: &str = "global";

/// What a management subcommand asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagAction {
    Enable,
    Disable,
    Status,
}

impl FlagAction {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "on" | "enable" => Some(FlagAction::Enable),
            "off" | "disable" => Some(FlagAction::Disable),
            "status" => Some(FlagAction::Status),
            _ => None,
        }
    }
}

/// A parsed `.tagall` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagallCommand {
    /// `.tagall`
    Broadcast,
    /// `.tagall on|off|status`
    Group(FlagAction),
    /// `.tagall global on|off|status`
    Global(FlagAction),
    /// `.tagall global <anything else>`; owner only, then broadcast
    GlobalUnrecognized,
    /// `.tagall <anything else>`; gated like group management, then broadcast
    Unrecognized,
}

impl TagallCommand {
    /// Parse message text, returning `None` when it is not a `.tagall` command.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        let mut tokens = normalized.split_whitespace();

        if tokens.next() != Some(COMMAND_TOKEN) {
            return None;
        }

        let command = match tokens.next() {
            None => TagallCommand::Broadcast,
            Some(GLOBAL_TOKEN) => match tokens.next() {
                None => TagallCommand::Unrecognized,
                Some(token) => FlagAction::from_token(token)
                    .map(TagallCommand::Global)
                    .unwrap_or(TagallCommand::GlobalUnrecognized),
            },
            Some(token) => FlagAction::from_token(token)
                .map(TagallCommand::Group)
                .unwrap_or(TagallCommand::Unrecognized),
        };

        Some(command)
    }

    /// Whether handling the command may write to the permission store
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            TagallCommand::Group(FlagAction::Enable | FlagAction::Disable)
                | TagallCommand::Global(FlagAction::Enable | FlagAction::Disable)
        )
    }
}
