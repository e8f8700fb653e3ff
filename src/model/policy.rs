use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Who may run which commands, beyond the application owners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Users treated like owners.
    pub operators: BTreeSet<u64>,
    pub elevated_roles: BTreeSet<u64>,
    pub elevated_members: BTreeSet<u64>,
}

#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    pub user_id: u64,
    pub role_ids: &'a [u64],
    pub is_owner: bool,
}

impl Policy {
    /// Returns `false` if the role was already elevated.
    pub fn elevate_role(&mut self, role_id: u64) -> bool {
        self.elevated_roles.insert(role_id)
    }

    pub fn elevate_member(&mut self, user_id: u64) -> bool {
        self.elevated_members.insert(user_id)
    }

    pub fn clear_elevations(&mut self) {
        self.elevated_roles.clear();
        self.elevated_members.clear();
    }

    pub fn add_operator(&mut self, user_id: u64) -> bool {
        self.operators.insert(user_id)
    }

    pub fn remove_operator(&mut self, user_id: u64) -> bool {
        self.operators.remove(&user_id)
    }

    pub fn is_operator(&self, caller: &Caller<'_>) -> bool {
        caller.is_owner || self.operators.contains(&caller.user_id)
    }

    pub fn is_privileged(&self, caller: &Caller<'_>) -> bool {
        self.is_operator(caller)
            || self.elevated_members.contains(&caller.user_id)
            || caller
                .role_ids
                .iter()
                .any(|role_id| self.elevated_roles.contains(role_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(user_id: u64, role_ids: &[u64]) -> Caller<'_> {
        Caller {
            user_id,
            role_ids,
            is_owner: false,
        }
    }

    #[test]
    fn elevation_is_idempotent() {
        let mut policy = Policy::default();
        assert!(policy.elevate_role(5));
        assert!(!policy.elevate_role(5));
        assert!(policy.elevate_member(7));
        assert!(!policy.elevate_member(7));
        assert_eq!(policy.elevated_roles.len(), 1);

        policy.clear_elevations();
        assert!(policy.elevated_roles.is_empty());
        assert!(policy.elevated_members.is_empty());
    }

    #[test]
    fn clearing_elevations_keeps_operators() {
        let mut policy = Policy::default();
        policy.add_operator(1);
        policy.elevate_member(2);
        policy.clear_elevations();
        assert!(policy.operators.contains(&1));
    }

    #[test]
    fn privilege_check() {
        let mut policy = Policy::default();
        assert!(!policy.is_privileged(&caller(1, &[])));

        let owner = Caller {
            user_id: 1,
            role_ids: &[],
            is_owner: true,
        };
        assert!(policy.is_privileged(&owner));
        assert!(policy.is_operator(&owner));

        policy.elevate_role(100);
        assert!(policy.is_privileged(&caller(2, &[99, 100])));
        assert!(!policy.is_operator(&caller(2, &[99, 100])));

        policy.elevate_member(3);
        assert!(policy.is_privileged(&caller(3, &[])));

        policy.add_operator(4);
        assert!(policy.is_operator(&caller(4, &[])));
        assert!(policy.remove_operator(4));
        assert!(!policy.is_privileged(&caller(4, &[])));
    }
}
