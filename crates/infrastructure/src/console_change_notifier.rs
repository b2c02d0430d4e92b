//! Console change notifier for development. Logs envelopes to tracing output.

use async_trait::async_trait;
use permission_application::{ChangeNotifier, PlayerRolesChangedEvent, RoleChangedEvent};
use permission_core::AppResult;
use tracing::info;

use crate::ChangeEventEnvelope;

/// Development notifier that logs every change.
#[derive(Clone, Default)]
pub struct ConsoleChangeNotifier;

impl ConsoleChangeNotifier {
    /// Creates a new console notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn log(envelope: &ChangeEventEnvelope) -> AppResult<()> {
        let body = envelope.encode()?;
        info!(kind = envelope.kind(), "change published (console): {body}");
        Ok(())
    }
}

#[async_trait]
impl ChangeNotifier for ConsoleChangeNotifier {
    async fn publish_role_changed(&self, event: RoleChangedEvent) -> AppResult<()> {
        Self::log(&ChangeEventEnvelope::from(&event))
    }

    async fn publish_player_roles_changed(&self, event: PlayerRolesChangedEvent) -> AppResult<()> {
        Self::log(&ChangeEventEnvelope::from(&event))
    }
}
