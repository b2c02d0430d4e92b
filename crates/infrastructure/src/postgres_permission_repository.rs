use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use permission_application::{PlayerRoleRepository, RoleRepository, RoleSetChange};
use permission_core::{AppError, AppResult, PlayerId};
use permission_domain::{PermissionNodePayload, Player, Role, RolePayload};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

mod players;
mod roles;

#[cfg(test)]
mod tests;

/// PostgreSQL-backed repository for roles and player memberships.
///
/// Each operation is a single statement bounded by `operation_timeout`.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
    operation_timeout: Duration,
}

impl PostgresPermissionRepository {
    /// Creates a repository with the provided connection pool and per-call timeout.
    #[must_use]
    pub fn new(pool: PgPool, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        statement: impl Future<Output = Result<T, sqlx::Error>>,
        map_error: impl FnOnce(sqlx::Error) -> AppError,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.operation_timeout, statement).await {
            Ok(result) => result.map_err(map_error),
            Err(_) => Err(AppError::Internal(format!(
                "failed to {operation}: timed out after {} ms",
                self.operation_timeout.as_millis()
            ))),
        }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return true;
    }

    false
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: String,
    priority: i64,
    display_name: Option<String>,
    permissions: Json<Vec<PermissionNodePayload>>,
}

impl RoleRow {
    fn into_role(self) -> AppResult<Role> {
        let priority = u32::try_from(self.priority).map_err(|_| {
            AppError::Internal(format!(
                "role '{}' has out-of-range priority {}",
                self.id, self.priority
            ))
        })?;

        Role::try_from(RolePayload {
            id: self.id,
            priority,
            display_name: self.display_name,
            permissions: self.permissions.0,
        })
    }
}

fn permissions_document(role: &Role) -> Json<Vec<PermissionNodePayload>> {
    Json(
        role.permissions()
            .iter()
            .map(PermissionNodePayload::from)
            .collect(),
    )
}

#[derive(Debug, FromRow)]
struct PlayerRow {
    id: Uuid,
    role_ids: Vec<String>,
}

impl From<PlayerRow> for Player {
    fn from(value: PlayerRow) -> Self {
        Player::with_roles(PlayerId::from_uuid(value.id), value.role_ids)
    }
}

#[derive(Debug, FromRow)]
struct RoleSetChangeRow {
    player_existed: bool,
    changed: bool,
}

impl From<RoleSetChangeRow> for RoleSetChange {
    fn from(value: RoleSetChangeRow) -> Self {
        Self {
            player_existed: value.player_existed,
            changed: value.changed,
        }
    }
}

#[async_trait]
impl RoleRepository for PostgresPermissionRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.list_roles_impl().await
    }

    async fn find_role(&self, role_id: &str) -> AppResult<Option<Role>> {
        self.find_role_impl(role_id).await
    }

    async fn role_exists(&self, role_id: &str) -> AppResult<bool> {
        self.role_exists_impl(role_id).await
    }

    async fn insert_role(&self, role: &Role) -> AppResult<()> {
        self.insert_role_impl(role).await
    }

    async fn replace_role(&self, role: &Role) -> AppResult<()> {
        self.replace_role_impl(role).await
    }
}

#[async_trait]
impl PlayerRoleRepository for PostgresPermissionRepository {
    async fn find_player(&self, player_id: PlayerId) -> AppResult<Option<Player>> {
        self.find_player_impl(player_id).await
    }

    async fn insert_player(&self, player: &Player) -> AppResult<()> {
        self.insert_player_impl(player).await
    }

    async fn add_role_to_player(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<RoleSetChange> {
        self.add_role_to_player_impl(player_id, role_id).await
    }

    async fn remove_role_from_player(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<RoleSetChange> {
        self.remove_role_from_player_impl(player_id, role_id).await
    }
}
