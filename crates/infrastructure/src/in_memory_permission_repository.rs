use std::collections::HashMap;

use async_trait::async_trait;
use permission_application::{PlayerRoleRepository, RoleRepository, RoleSetChange};
use permission_core::{AppError, AppResult, PlayerId};
use permission_domain::{Player, Role};
use tokio::sync::RwLock;

#[cfg(test)]
mod tests;

/// In-memory role and membership store.
///
/// Roles keep insertion order so equal-priority resolution is stable.
#[derive(Debug, Default)]
pub struct InMemoryPermissionRepository {
    roles: RwLock<Vec<Role>>,
    players: RwLock<HashMap<PlayerId, Player>>,
}

impl InMemoryPermissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryPermissionRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.read().await.clone())
    }

    async fn find_role(&self, role_id: &str) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .iter()
            .find(|role| role.id() == role_id)
            .cloned())
    }

    async fn role_exists(&self, role_id: &str) -> AppResult<bool> {
        Ok(self.roles.read().await.iter().any(|role| role.id() == role_id))
    }

    async fn insert_role(&self, role: &Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;

        if roles.iter().any(|stored| stored.id() == role.id()) {
            return Err(AppError::conflict(format!(
                "role '{}' already exists",
                role.id()
            )));
        }

        roles.push(role.clone());
        Ok(())
    }

    async fn replace_role(&self, role: &Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;

        let Some(stored) = roles.iter_mut().find(|stored| stored.id() == role.id()) else {
            return Err(AppError::not_found(format!(
                "role '{}' does not exist",
                role.id()
            )));
        };

        *stored = role.clone();
        Ok(())
    }
}

#[async_trait]
impl PlayerRoleRepository for InMemoryPermissionRepository {
    async fn find_player(&self, player_id: PlayerId) -> AppResult<Option<Player>> {
        Ok(self.players.read().await.get(&player_id).cloned())
    }

    async fn insert_player(&self, player: &Player) -> AppResult<()> {
        let mut players = self.players.write().await;

        if players.contains_key(&player.id()) {
            return Err(AppError::conflict(format!(
                "player '{}' already exists",
                player.id()
            )));
        }

        players.insert(player.id(), player.clone());
        Ok(())
    }

    async fn add_role_to_player(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<RoleSetChange> {
        let mut players = self.players.write().await;

        Ok(match players.get_mut(&player_id) {
            Some(player) => RoleSetChange {
                player_existed: true,
                changed: player.add_role(role_id),
            },
            None => RoleSetChange {
                player_existed: false,
                changed: false,
            },
        })
    }

    async fn remove_role_from_player(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<RoleSetChange> {
        let mut players = self.players.write().await;

        Ok(match players.get_mut(&player_id) {
            Some(player) => RoleSetChange {
                player_existed: true,
                changed: player.remove_role(role_id),
            },
            None => RoleSetChange {
                player_existed: false,
                changed: false,
            },
        })
    }
}
