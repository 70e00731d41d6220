use serde::{Deserialize, Serialize};

/// Role of the account issuing a command, resolved by the chat client layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Owner,
    GroupAdmin,
    Member,
}

impl ActorRole {
    /// Derive the role from the collaborator lookups.
    ///
    /// Owner status is independent of any group's admin list and wins over it.
    pub fn resolve(is_owner_or_sudo: bool, is_group_admin: bool) -> Self {
        if is_owner_or_sudo {
            ActorRole::Owner
        } else if is_group_admin {
            ActorRole::GroupAdmin
        } else {
            ActorRole::Member
        }
    }

    /// Check if the actor is the bot owner
    pub fn is_owner(&self) -> bool {
        matches!(self, ActorRole::Owner)
    }

    /// Check if the actor holds elevated privilege in the group
    pub fn is_privileged(&self) -> bool {
        matches!(self, ActorRole::Owner | ActorRole::GroupAdmin)
    }

    /// Get all possible roles
    pub fn all() -> [ActorRole; 3] {
        [ActorRole::Owner, ActorRole::GroupAdmin, ActorRole::Member]
    }
}

/// Which flag a management command targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ManageScope {
    Group,
    Global,
}

/// Effective policy for one group, derived from the `(group, global)` flag pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyState {
    AdminsOnly,
    GroupOpen,
    GlobalOpen,
    BothOpen,
}

impl PolicyState {
    pub fn from_flags(group_flag: bool, global_flag: bool) -> Self {
        match (group_flag, global_flag) {
            (false, false) => PolicyState::AdminsOnly,
            (true, false) => PolicyState::GroupOpen,
            (false, true) => PolicyState::GlobalOpen,
            (true, true) => PolicyState::BothOpen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_resolution_prefers_owner() {
        assert_eq!(ActorRole::resolve(true, true), ActorRole::Owner);
        assert_eq!(ActorRole::resolve(true, false), ActorRole::Owner);
        assert_eq!(ActorRole::resolve(false, true), ActorRole::GroupAdmin);
        assert_eq!(ActorRole::resolve(false, false), ActorRole::Member);
    }

    #[test]
    fn test_role_privileges() {
        assert!(ActorRole::Owner.is_owner());
        assert!(ActorRole::Owner.is_privileged());

        assert!(!ActorRole::GroupAdmin.is_owner());
        assert!(ActorRole::GroupAdmin.is_privileged());

        assert!(!ActorRole::Member.is_owner());
        assert!(!ActorRole::Member.is_privileged());
    }

    #[test]
    fn test_policy_state_from_flags() {
        assert_eq!(PolicyState::from_flags(false, false), PolicyState::AdminsOnly);
        assert_eq!(PolicyState::from_flags(true, false), PolicyState::GroupOpen);
        assert_eq!(PolicyState::from_flags(false, true), PolicyState::GlobalOpen);
        assert_eq!(PolicyState::from_flags(true, true), PolicyState::BothOpen);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ActorRole::GroupAdmin).unwrap();
        assert_eq!(json, "\"group_admin\"");
        let scope: ManageScope = serde_json::from_str("\"global\"").unwrap();
        assert_eq!(scope, ManageScope::Global);
    }
}
