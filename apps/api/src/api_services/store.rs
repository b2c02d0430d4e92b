use std::sync::Arc;

use permission_application::{PlayerRoleRepository, RoleRepository};
use permission_core::AppError;
use permission_infrastructure::{InMemoryPermissionRepository, PostgresPermissionRepository};
use sqlx::PgPool;
use tracing::info;

use crate::api_config::{ApiConfig, StoreProviderConfig};

use super::database::connect_and_migrate;

/// Repository handles for the configured store backend.
pub struct StoreHandles {
    pub role_repository: Arc<dyn RoleRepository>,
    pub player_repository: Arc<dyn PlayerRoleRepository>,
    pub postgres_pool: Option<PgPool>,
}

impl StoreHandles {
    pub fn in_memory() -> Self {
        let repository = Arc::new(InMemoryPermissionRepository::new());
        Self {
            role_repository: repository.clone(),
            player_repository: repository,
            postgres_pool: None,
        }
    }

    fn postgres(pool: PgPool, config: &ApiConfig) -> Self {
        let repository = Arc::new(PostgresPermissionRepository::new(
            pool.clone(),
            config.store_operation_timeout,
        ));
        Self {
            role_repository: repository.clone(),
            player_repository: repository,
            postgres_pool: Some(pool),
        }
    }
}

pub async fn build_store(config: &ApiConfig) -> Result<StoreHandles, AppError> {
    match &config.store_provider {
        StoreProviderConfig::Postgres { database_url } => {
            let pool = connect_and_migrate(database_url, config.store_operation_timeout).await?;
            info!("postgres store ready");
            Ok(StoreHandles::postgres(pool, config))
        }
        StoreProviderConfig::Memory => {
            info!("in-memory store ready; state is lost on restart");
            Ok(StoreHandles::in_memory())
        }
    }
}
