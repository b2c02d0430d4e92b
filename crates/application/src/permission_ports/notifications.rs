use async_trait::async_trait;

use permission_core::{AppResult, PlayerId};
use permission_domain::{PlayerRolesChangeType, Role, RoleChangeType};

/// Announcement that a role was created or modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChangedEvent {
    /// Role state after the mutation.
    pub role: Option<Role>,
    /// Mutation kind.
    pub change_type: RoleChangeType,
}

/// Announcement that a player's role set changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRolesChangedEvent {
    /// Affected player.
    pub player_id: PlayerId,
    /// Role added or removed.
    pub role_id: String,
    /// Mutation kind.
    pub change_type: PlayerRolesChangeType,
}

/// Port for announcing committed mutations to downstream consumers.
///
/// Implementations must return after at most a short local buffering step;
/// delivery is best-effort.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    /// Publishes a role change.
    async fn publish_role_changed(&self, event: RoleChangedEvent) -> AppResult<()>;

    /// Publishes a player role-set change.
    async fn publish_player_roles_changed(&self, event: PlayerRolesChangedEvent)
    -> AppResult<()>;
}
