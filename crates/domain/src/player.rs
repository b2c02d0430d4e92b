use std::collections::BTreeSet;

use permission_core::PlayerId;

use crate::role::DEFAULT_ROLE_ID;

/// Membership record linking a player to the roles assigned to them.
///
/// Records are created lazily on first reference and are seeded with the
/// default role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    role_ids: BTreeSet<String>,
}

impl Player {
    /// Creates a fresh record holding only the default role.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self::with_roles(id, [DEFAULT_ROLE_ID.to_owned()])
    }

    /// Creates a record from stored role identifiers; duplicates collapse.
    #[must_use]
    pub fn with_roles(id: PlayerId, role_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            id,
            role_ids: role_ids.into_iter().collect(),
        }
    }

    /// Returns the player identifier.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the assigned role identifiers in ascending order.
    #[must_use]
    pub fn role_ids(&self) -> &BTreeSet<String> {
        &self.role_ids
    }

    /// Adds a role. Returns `false` when the player already held it.
    pub fn add_role(&mut self, role_id: &str) -> bool {
        self.role_ids.insert(role_id.to_owned())
    }

    /// Removes a role. Returns `false` when the player did not hold it.
    pub fn remove_role(&mut self, role_id: &str) -> bool {
        self.role_ids.remove(role_id)
    }
}

#[cfg(test)]
mod tests {
    use permission_core::PlayerId;

    use super::Player;
    use crate::DEFAULT_ROLE_ID;

    #[test]
    fn new_player_holds_only_the_default_role() {
        let player = Player::new(PlayerId::new());
        assert_eq!(player.role_ids().len(), 1);
        assert!(player.role_ids().contains(DEFAULT_ROLE_ID));
    }

    #[test]
    fn add_and_remove_report_whether_the_set_changed() {
        let mut player = Player::new(PlayerId::new());

        assert!(player.add_role("admin"));
        assert!(!player.add_role("admin"));
        assert!(player.remove_role("admin"));
        assert!(!player.remove_role("admin"));
    }
}
