//! Permission service composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use permission_application::RoleService;
use permission_core::AppError;
use permission_infrastructure::BufferedChangeNotifier;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, StoreProviderConfig, init_tracing};
use crate::api_services::{
    StoreHandles, build_app_state, build_change_notifier, build_store, connect_and_migrate,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    if config.migrate_only {
        if let StoreProviderConfig::Postgres { database_url } = &config.store_provider {
            let pool = connect_and_migrate(database_url, config.store_operation_timeout).await?;
            pool.close().await;
        }
        info!("database migrations applied successfully");
        return Ok(());
    }

    let store: StoreHandles = build_store(&config).await?;

    let downstream = build_change_notifier(&config)?;
    let notifier = Arc::new(BufferedChangeNotifier::spawn(
        downstream,
        config.notifier_buffer_capacity,
        config.notifier_publish_timeout,
    ));

    let seeded = RoleService::new(store.role_repository.clone(), notifier.clone())
        .ensure_default_role()
        .await?;
    if !seeded {
        info!("default role already present");
    }

    let app_state = build_app_state(&store, notifier.clone());
    let app = api_router::build_router(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "permission-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))?;

    info!("draining change notifier");
    if let Err(error) = notifier.shutdown().await {
        warn!(error = %error, "change notifier did not drain cleanly");
    }

    if let Some(pool) = store.postgres_pool {
        pool.close().await;
    }

    info!("permission-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(error = %error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(error = %error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
