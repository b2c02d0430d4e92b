//! Redis pub/sub change notifier.

use async_trait::async_trait;
use permission_application::{ChangeNotifier, PlayerRolesChangedEvent, RoleChangedEvent};
use permission_core::{AppError, AppResult};

use crate::ChangeEventEnvelope;

/// Publishes change envelopes to a Redis channel.
#[derive(Clone)]
pub struct RedisChangeNotifier {
    client: redis::Client,
    channel: String,
}

impl RedisChangeNotifier {
    /// Creates a notifier publishing on `channel`.
    #[must_use]
    pub fn new(client: redis::Client, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: channel.into(),
        }
    }

    async fn publish(&self, envelope: ChangeEventEnvelope) -> AppResult<()> {
        let body = envelope.encode()?;
        let mut connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))?;

        redis::cmd("PUBLISH")
            .arg(self.channel.as_str())
            .arg(body)
            .query_async::<i64>(&mut connection)
            .await
            .map(|_| ())
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to publish {} to redis channel '{}': {error}",
                    envelope.kind(),
                    self.channel
                ))
            })
    }
}

#[async_trait]
impl ChangeNotifier for RedisChangeNotifier {
    async fn publish_role_changed(&self, event: RoleChangedEvent) -> AppResult<()> {
        self.publish(ChangeEventEnvelope::from(&event)).await
    }

    async fn publish_player_roles_changed(&self, event: PlayerRolesChangedEvent) -> AppResult<()> {
        self.publish(ChangeEventEnvelope::from(&event)).await
    }
}
