//! Permission checking utilities.

use crate::entities::{ActorRole, ManageScope};
use crate::types::{RequestedAction, TagallError};

/// Access decisions for the `.tagall` command
pub struct AccessDecision;

impl AccessDecision {
    /// Whether the actor may broadcast to every member.
    ///
    /// Any one of: privileged role, group opted in, global override on.
    pub fn can_broadcast(role: ActorRole, group_flag: bool, global_flag: bool) -> bool {
        role.is_privileged() || group_flag || global_flag
    }

    /// Whether the actor may toggle the flag for the given scope
    pub fn can_manage(role: ActorRole, scope: ManageScope) -> bool {
        match scope {
            ManageScope::Global => role.is_owner(),
            ManageScope::Group => role.is_privileged(),
        }
    }

    /// Check if the actor can broadcast
    pub fn check_broadcast(
        role: ActorRole,
        group_flag: bool,
        global_flag: bool,
    ) -> Result<(), TagallError> {
        if !Self::can_broadcast(role, group_flag, global_flag) {
            return Err(TagallError::insufficient_privilege(RequestedAction::Broadcast));
        }
        Ok(())
    }

    /// Check if the actor can manage the given scope; must pass before any store write
    pub fn check_manage(role: ActorRole, scope: ManageScope) -> Result<(), TagallError> {
        if !Self::can_manage(role, scope) {
            return Err(TagallError::insufficient_privilege(RequestedAction::Manage(scope)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_broadcast_truth_table() {
        for role in ActorRole::all() {
            for group_flag in [false, true] {
                for global_flag in [false, true] {
                    let expected = matches!(role, ActorRole::Owner | ActorRole::GroupAdmin)
                        || group_flag
                        || global_flag;
                    assert_eq!(
                        AccessDecision::can_broadcast(role, group_flag, global_flag),
                        expected,
                        "role={role:?} group={group_flag} global={global_flag}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_member_needs_a_flag_to_broadcast() {
        assert!(!AccessDecision::can_broadcast(ActorRole::Member, false, false));
        assert!(AccessDecision::can_broadcast(ActorRole::Member, true, false));
        assert!(AccessDecision::can_broadcast(ActorRole::Member, false, true));
        assert!(AccessDecision::can_broadcast(ActorRole::Member, true, true));
    }

    #[test]
    fn test_can_manage_global_is_owner_only() {
        assert!(AccessDecision::can_manage(ActorRole::Owner, ManageScope::Global));
        assert!(!AccessDecision::can_manage(ActorRole::GroupAdmin, ManageScope::Global));
        assert!(!AccessDecision::can_manage(ActorRole::Member, ManageScope::Global));
    }

    #[test]
    fn test_can_manage_group_allows_admins() {
        assert!(AccessDecision::can_manage(ActorRole::Owner, ManageScope::Group));
        assert!(AccessDecision::can_manage(ActorRole::GroupAdmin, ManageScope::Group));
        assert!(!AccessDecision::can_manage(ActorRole::Member, ManageScope::Group));
    }

    #[test]
    fn test_checks_report_requested_action() {
        assert!(AccessDecision::check_broadcast(ActorRole::GroupAdmin, false, false).is_ok());
        assert!(matches!(
            AccessDecision::check_broadcast(ActorRole::Member, false, false),
            Err(TagallError::InsufficientPrivilege {
                action: RequestedAction::Broadcast
            })
        ));

        assert!(AccessDecision::check_manage(ActorRole::GroupAdmin, ManageScope::Group).is_ok());
        assert!(matches!(
            AccessDecision::check_manage(ActorRole::GroupAdmin, ManageScope::Global),
            Err(TagallError::InsufficientPrivilege {
                action: RequestedAction::Manage(ManageScope::Global)
            })
        ));
    }
}
