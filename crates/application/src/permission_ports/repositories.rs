use async_trait::async_trait;

use permission_core::{AppResult, PlayerId};
use permission_domain::{Player, Role};

/// Outcome of a single-record set mutation on a player's roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSetChange {
    /// Whether the player record existed when the mutation ran.
    pub player_existed: bool,
    /// Whether the role set was modified.
    pub changed: bool,
}

/// Repository port for role records.
///
/// Every operation is atomic on a single record and bounded by the adapter's
/// per-call timeout.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists every role in a stable order.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Finds a role by identifier.
    async fn find_role(&self, role_id: &str) -> AppResult<Option<Role>>;

    /// Returns whether a role exists.
    async fn role_exists(&self, role_id: &str) -> AppResult<bool>;

    /// Inserts a new role. Fails with `Conflict` on a duplicate identifier.
    async fn insert_role(&self, role: &Role) -> AppResult<()>;

    /// Replaces a stored role by identifier. Fails with `NotFound` if absent.
    async fn replace_role(&self, role: &Role) -> AppResult<()>;
}

/// Repository port for player membership records.
#[async_trait]
pub trait PlayerRoleRepository: Send + Sync {
    /// Finds a player record.
    async fn find_player(&self, player_id: PlayerId) -> AppResult<Option<Player>>;

    /// Inserts a player record. Fails with `Conflict` if one already exists.
    async fn insert_player(&self, player: &Player) -> AppResult<()>;

    /// Adds a role to the player's set if not already present.
    async fn add_role_to_player(&self, player_id: PlayerId, role_id: &str)
    -> AppResult<RoleSetChange>;

    /// Removes a role from the player's set if present.
    async fn remove_role_from_player(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<RoleSetChange>;
}
