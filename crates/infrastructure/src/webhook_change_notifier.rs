//! HTTP webhook change notifier.

use async_trait::async_trait;
use permission_application::{ChangeNotifier, PlayerRolesChangedEvent, RoleChangedEvent};
use permission_core::{AppError, AppResult};

use crate::ChangeEventEnvelope;

/// Posts change envelopes to a webhook endpoint.
#[derive(Clone)]
pub struct WebhookChangeNotifier {
    http_client: reqwest::Client,
    endpoint: String,
}

impl WebhookChangeNotifier {
    /// Creates a notifier posting to `endpoint`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, envelope: ChangeEventEnvelope) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.endpoint.as_str())
            .header("X-Permission-Event", envelope.kind())
            .json(&envelope)
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to post {} to webhook: {error}",
                    envelope.kind()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "webhook rejected {} with status {status}",
                envelope.kind()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ChangeNotifier for WebhookChangeNotifier {
    async fn publish_role_changed(&self, event: RoleChangedEvent) -> AppResult<()> {
        self.post(ChangeEventEnvelope::from(&event)).await
    }

    async fn publish_player_roles_changed(&self, event: PlayerRolesChangedEvent) -> AppResult<()> {
        self.post(ChangeEventEnvelope::from(&event)).await
    }
}
