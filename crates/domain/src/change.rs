use serde::{Deserialize, Serialize};

/// Kind of mutation announced for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleChangeType {
    /// The role was created.
    Create,
    /// The role was updated.
    Modify,
}

impl RoleChangeType {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Modify => "MODIFY",
        }
    }
}

/// Kind of mutation announced for a player's role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerRolesChangeType {
    /// A role was added to the player.
    Add,
    /// A role was removed from the player.
    Remove,
}

impl PlayerRolesChangeType {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Remove => "REMOVE",
        }
    }
}
