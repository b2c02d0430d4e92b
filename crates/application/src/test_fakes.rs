use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use permission_core::{AppError, AppResult, PlayerId};
use permission_domain::{Player, Role};

use crate::{
    ChangeNotifier, PlayerRoleRepository, PlayerRolesChangedEvent, RoleChangedEvent,
    RoleRepository, RoleSetChange,
};

#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) roles: Mutex<Vec<Role>>,
    pub(crate) players: Mutex<HashMap<PlayerId, Player>>,
    /// Deletes the role right before a replace, simulating a concurrent removal.
    pub(crate) vanish_on_replace: bool,
    /// Record written by a concurrent caller just before the next player insert.
    pub(crate) racing_player: Mutex<Option<Player>>,
    pub(crate) player_inserts: Mutex<usize>,
}

impl FakeStore {
    pub(crate) fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: Mutex::new(roles),
            ..Self::default()
        }
    }
}

#[async_trait]
impl RoleRepository for FakeStore {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.lock().await.clone())
    }

    async fn find_role(&self, role_id: &str) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.id() == role_id)
            .cloned())
    }

    async fn role_exists(&self, role_id: &str) -> AppResult<bool> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .any(|role| role.id() == role_id))
    }

    async fn insert_role(&self, role: &Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        if roles.iter().any(|stored| stored.id() == role.id()) {
            return Err(AppError::conflict(format!(
                "duplicate key '{}'",
                role.id()
            )));
        }
        roles.push(role.clone());
        Ok(())
    }

    async fn replace_role(&self, role: &Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        if self.vanish_on_replace {
            roles.retain(|stored| stored.id() != role.id());
        }
        match roles.iter_mut().find(|stored| stored.id() == role.id()) {
            Some(stored) => {
                *stored = role.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("role '{}'", role.id()))),
        }
    }
}

#[async_trait]
impl PlayerRoleRepository for FakeStore {
    async fn find_player(&self, player_id: PlayerId) -> AppResult<Option<Player>> {
        Ok(self.players.lock().await.get(&player_id).cloned())
    }

    async fn insert_player(&self, player: &Player) -> AppResult<()> {
        let mut players = self.players.lock().await;
        if let Some(racing) = self.racing_player.lock().await.take() {
            players.insert(racing.id(), racing);
        }
        if players.contains_key(&player.id()) {
            return Err(AppError::conflict(format!(
                "duplicate key '{}'",
                player.id()
            )));
        }
        players.insert(player.id(), player.clone());
        *self.player_inserts.lock().await += 1;
        Ok(())
    }

    async fn add_role_to_player(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<RoleSetChange> {
        let mut players = self.players.lock().await;
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
        let mut players = self.players.lock().await;
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

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) fail: bool,
    pub(crate) role_events: Mutex<Vec<RoleChangedEvent>>,
    pub(crate) player_events: Mutex<Vec<PlayerRolesChangedEvent>>,
}

impl RecordingNotifier {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ChangeNotifier for RecordingNotifier {
    async fn publish_role_changed(&self, event: RoleChangedEvent) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Internal("broker unavailable".to_owned()));
        }
        self.role_events.lock().await.push(event);
        Ok(())
    }

    async fn publish_player_roles_changed(
        &self,
        event: PlayerRolesChangedEvent,
    ) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Internal("broker unavailable".to_owned()));
        }
        self.player_events.lock().await.push(event);
        Ok(())
    }
}

pub(crate) fn role(id: &str, priority: u32, display_name: Option<&str>) -> Role {
    match Role::new(id, priority, display_name.map(str::to_owned)) {
        Ok(role) => role,
        Err(error) => panic!("invalid test role: {error}"),
    }
}
