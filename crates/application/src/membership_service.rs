use std::collections::BTreeSet;
use std::sync::Arc;

use permission_core::{AppError, AppResult, ErrorReason, PlayerId};
use permission_domain::{
    DEFAULT_ROLE_ID, Player, PlayerRolesChangeType, resolve_active_display_role,
};

use crate::announce::announce_player_roles_changed;
use crate::{
    ChangeNotifier, PlayerRoleRepository, PlayerRoles, PlayerRolesChangedEvent, RoleRepository,
    RoleSetChange,
};


/// Application service for player role membership.
#[derive(Clone)]
pub struct MembershipService {
    role_repository: Arc<dyn RoleRepository>,
    player_repository: Arc<dyn PlayerRoleRepository>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl MembershipService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn RoleRepository>,
        player_repository: Arc<dyn PlayerRoleRepository>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            role_repository,
            player_repository,
            notifier,
        }
    }

    /// Returns the player's role identifiers, creating the record on first access.
    ///
    /// A duplicate-key failure on the lazy insert means a concurrent caller
    /// created the record first; the stored value is re-read and returned.
    pub async fn player_role_ids(&self, player_id: PlayerId) -> AppResult<BTreeSet<String>> {
        if let Some(player) = self.player_repository.find_player(player_id).await? {
            return Ok(player.role_ids().clone());
        }

        let player = Player::new(player_id);
        match self.player_repository.insert_player(&player).await {
            Ok(()) => Ok(player.role_ids().clone()),
            Err(AppError::Conflict { .. }) => self
                .player_repository
                .find_player(player_id)
                .await?
                .map(|stored| stored.role_ids().clone())
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "player '{player_id}' conflicted on insert but could not be read back"
                    ))
                }),
            Err(error) => Err(error),
        }
    }

    /// Returns the player's role identifiers and their active display role.
    ///
    /// When `username` is given, the active role's display-name template is
    /// rendered for it.
    pub async fn player_roles(
        &self,
        player_id: PlayerId,
        username: Option<&str>,
    ) -> AppResult<PlayerRoles> {
        let role_ids = self.player_role_ids(player_id).await?;
        let all_roles = self.role_repository.list_roles().await?;
        let active_role = resolve_active_display_role(&role_ids, &all_roles);
        let active_display_name = username
            .zip(active_role)
            .and_then(|(username, role)| role.render_display_name(username));

        Ok(PlayerRoles {
            role_ids,
            active_display_role_id: active_role.map(|role| role.id().to_owned()),
            active_display_name,
        })
    }

    /// Assigns a role to a player and announces it.
    pub async fn add_role_to_player(&self, player_id: PlayerId, role_id: &str) -> AppResult<()> {
        if !self.role_repository.role_exists(role_id).await? {
            return Err(AppError::not_found_because(
                ErrorReason::RoleNotFound,
                format!("role '{role_id}' was not found"),
            ));
        }

        let change = self
            .player_repository
            .add_role_to_player(player_id, role_id)
            .await?;

        if !change.player_existed {
            self.bootstrap_player_with_role(player_id, role_id).await?;
        } else if !change.changed {
            return Err(already_has_role(player_id, role_id));
        }

        announce_player_roles_changed(
            self.notifier.as_ref(),
            PlayerRolesChangedEvent {
                player_id,
                role_id: role_id.to_owned(),
                change_type: PlayerRolesChangeType::Add,
            },
        )
        .await;

        Ok(())
    }

    /// Removes a role from a player and announces it.
    ///
    /// The default role is not guarded and can be removed like any other.
    pub async fn remove_role_from_player(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<()> {
        let change = self
            .player_repository
            .remove_role_from_player(player_id, role_id)
            .await?;

        if !change.player_existed {
            return Err(AppError::not_found_because(
                ErrorReason::PlayerNotFound,
                format!("player '{player_id}' was not found"),
            ));
        }
        if !change.changed {
            return Err(AppError::not_found_because(
                ErrorReason::DoesNotHaveRole,
                format!("player '{player_id}' does not have role '{role_id}'"),
            ));
        }

        announce_player_roles_changed(
            self.notifier.as_ref(),
            PlayerRolesChangedEvent {
                player_id,
                role_id: role_id.to_owned(),
                change_type: PlayerRolesChangeType::Remove,
            },
        )
        .await;

        Ok(())
    }

    /// Creates a missing player record holding the default role and `role_id`.
    ///
    /// When a concurrent caller creates the record first, the set-add is
    /// retried against the stored record.
    async fn bootstrap_player_with_role(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<()> {
        let player =
            Player::with_roles(player_id, [DEFAULT_ROLE_ID.to_owned(), role_id.to_owned()]);

        match self.player_repository.insert_player(&player).await {
            Ok(()) => Ok(()),
            Err(AppError::Conflict { .. }) => {
                let retry = self
                    .player_repository
                    .add_role_to_player(player_id, role_id)
                    .await?;
                match retry {
                    RoleSetChange { changed: true, .. } => Ok(()),
                    RoleSetChange {
                        player_existed: true,
                        ..
                    } => Err(already_has_role(player_id, role_id)),
                    RoleSetChange { .. } => Err(AppError::Internal(format!(
                        "player '{player_id}' conflicted on insert but could not be updated"
                    ))),
                }
            }
            Err(error) => Err(error),
        }
    }
}

fn already_has_role(player_id: PlayerId, role_id: &str) -> AppError {
    AppError::conflict_because(
        ErrorReason::AlreadyHasRole,
        format!("player '{player_id}' already has role '{role_id}'"),
    )
}
