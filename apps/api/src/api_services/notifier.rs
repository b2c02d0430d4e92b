use std::sync::Arc;
use std::time::Duration;

use permission_application::ChangeNotifier;
use permission_core::AppError;
use permission_infrastructure::{ConsoleChangeNotifier, RedisChangeNotifier, WebhookChangeNotifier};
use tracing::info;

use crate::api_config::{ApiConfig, NotifierProviderConfig};

use super::redis::build_redis_client;

/// Builds the downstream notifier backend; buffering is layered on by the caller.
pub fn build_change_notifier(config: &ApiConfig) -> Result<Arc<dyn ChangeNotifier>, AppError> {
    match &config.notifier_provider {
        NotifierProviderConfig::Console => {
            info!("change notifier: console");
            Ok(Arc::new(ConsoleChangeNotifier::new()))
        }
        NotifierProviderConfig::Redis { redis_url, channel } => {
            let client = build_redis_client(redis_url)?;
            info!(channel = %channel, "change notifier: redis");
            Ok(Arc::new(RedisChangeNotifier::new(client, channel.as_str())))
        }
        NotifierProviderConfig::Webhook { url } => {
            let http_client = reqwest::Client::builder()
                .timeout(config.notifier_publish_timeout)
                .connect_timeout(Duration::from_secs(2))
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build webhook http client: {error}"))
                })?;
            info!(url = %url, "change notifier: webhook");
            Ok(Arc::new(WebhookChangeNotifier::new(http_client, url.as_str())))
        }
    }
}
