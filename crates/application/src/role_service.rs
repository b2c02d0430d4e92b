use std::sync::Arc;

use permission_core::{AppError, AppResult, ErrorReason};
use permission_domain::{Role, RoleChangeType};
use tracing::info;

use crate::announce::announce_role_changed;
use crate::{ChangeNotifier, CreateRoleInput, RoleChangedEvent, RoleRepository, UpdateRoleInput};

mod merge;


use merge::apply_role_update;

/// Application service for role creation and modification.
#[derive(Clone)]
pub struct RoleService {
    repository: Arc<dyn RoleRepository>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl RoleService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleRepository>, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Returns every role in store order.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.repository.list_roles().await
    }

    /// Inserts the default role unless it already exists. Returns whether it was created.
    pub async fn ensure_default_role(&self) -> AppResult<bool> {
        let role = Role::default_role()?;

        match self.repository.insert_role(&role).await {
            Ok(()) => {
                info!(role_id = role.id(), "seeded default role");
                Ok(true)
            }
            Err(AppError::Conflict { .. }) => Ok(false),
            Err(error) => Err(error),
        }
    }

    /// Creates a role with no permissions and announces it.
    ///
    /// Duplicate identifiers are detected by the store's primary key, not by a
    /// prior existence check.
    pub async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let role = Role::new(input.id, input.priority, input.display_name)?;

        self.repository
            .insert_role(&role)
            .await
            .map_err(|error| match error {
                AppError::Conflict { .. } => AppError::conflict_because(
                    ErrorReason::RoleAlreadyExists,
                    format!("role '{}' already exists", role.id()),
                ),
                other => other,
            })?;

        announce_role_changed(
            self.notifier.as_ref(),
            RoleChangedEvent {
                role: Some(role.clone()),
                change_type: RoleChangeType::Create,
            },
        )
        .await;

        Ok(role)
    }

    /// Merges a partial update into a stored role and announces it.
    pub async fn update_role(&self, role_id: &str, input: UpdateRoleInput) -> AppResult<Role> {
        let mut role = self
            .repository
            .find_role(role_id)
            .await?
            .ok_or_else(|| role_not_found(role_id))?;

        apply_role_update(&mut role, input);

        self.repository
            .replace_role(&role)
            .await
            .map_err(|error| match error {
                AppError::NotFound { .. } => role_not_found(role_id),
                other => other,
            })?;

        announce_role_changed(
            self.notifier.as_ref(),
            RoleChangedEvent {
                role: Some(role.clone()),
                change_type: RoleChangeType::Modify,
            },
        )
        .await;

        Ok(role)
    }
}

fn role_not_found(role_id: &str) -> AppError {
    AppError::not_found_because(
        ErrorReason::RoleNotFound,
        format!("role '{role_id}' was not found"),
    )
}
