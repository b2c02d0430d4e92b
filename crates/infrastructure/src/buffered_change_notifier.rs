//! Bounded local buffer in front of a slow change notifier.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use permission_application::{ChangeNotifier, PlayerRolesChangedEvent, RoleChangedEvent};
use permission_core::{AppError, AppResult};
use tokio::sync::{Mutex, RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};


#[derive(Debug)]
enum QueuedChange {
    Role(RoleChangedEvent),
    PlayerRoles(PlayerRolesChangedEvent),
}

impl QueuedChange {
    fn kind(&self) -> &'static str {
        match self {
            Self::Role(_) => "role_changed",
            Self::PlayerRoles(_) => "player_roles_changed",
        }
    }
}

/// Notifier that accepts changes into a bounded queue and delivers them from
/// a background task.
///
/// `publish_*` never waits on the downstream: a full or closed buffer fails
/// immediately. Delivery failures and timeouts are logged and dropped.
pub struct BufferedChangeNotifier {
    sender: RwLock<Option<mpsc::Sender<QueuedChange>>>,
    drain_task: Mutex<Option<JoinHandle<()>>>,
}

impl BufferedChangeNotifier {
    /// Spawns the drain task on the current runtime.
    #[must_use]
    pub fn spawn(
        downstream: Arc<dyn ChangeNotifier>,
        capacity: usize,
        publish_timeout: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let drain_task = tokio::spawn(drain(downstream, receiver, publish_timeout));

        Self {
            sender: RwLock::new(Some(sender)),
            drain_task: Mutex::new(Some(drain_task)),
        }
    }

    /// Stops accepting changes and waits until every buffered change has been
    /// handed to the downstream notifier.
    pub async fn shutdown(&self) -> AppResult<()> {
        self.sender.write().await.take();

        let Some(drain_task) = self.drain_task.lock().await.take() else {
            return Ok(());
        };

        drain_task.await.map_err(|error| {
            AppError::Internal(format!("change notifier drain task failed: {error}"))
        })
    }

    async fn enqueue(&self, change: QueuedChange) -> AppResult<()> {
        let guard = self.sender.read().await;
        let Some(sender) = guard.as_ref() else {
            return Err(AppError::Internal("change notifier is shut down".to_owned()));
        };

        sender.try_send(change).map_err(|error| match error {
            mpsc::error::TrySendError::Full(change) => AppError::Internal(format!(
                "change notifier buffer is full, dropping {}",
                change.kind()
            )),
            mpsc::error::TrySendError::Closed(change) => AppError::Internal(format!(
                "change notifier is closed, dropping {}",
                change.kind()
            )),
        })
    }
}

async fn drain(
    downstream: Arc<dyn ChangeNotifier>,
    mut receiver: mpsc::Receiver<QueuedChange>,
    publish_timeout: Duration,
) {
    let mut delivered = 0_u64;
    let mut failed = 0_u64;

    while let Some(change) = receiver.recv().await {
        let kind = change.kind();
        let delivery = async {
            match change {
                QueuedChange::Role(event) => downstream.publish_role_changed(event).await,
                QueuedChange::PlayerRoles(event) => {
                    downstream.publish_player_roles_changed(event).await
                }
            }
        };

        match tokio::time::timeout(publish_timeout, delivery).await {
            Ok(Ok(())) => delivered += 1,
            Ok(Err(error)) => {
                failed += 1;
                warn!(kind, error = %error, "failed to deliver change");
            }
            Err(_) => {
                failed += 1;
                warn!(
                    kind,
                    timeout_ms = u64::try_from(publish_timeout.as_millis()).unwrap_or(u64::MAX),
                    "timed out delivering change"
                );
            }
        }
    }

    info!(delivered, failed, "change notifier drained");
}

#[async_trait]
impl ChangeNotifier for BufferedChangeNotifier {
    async fn publish_role_changed(&self, event: RoleChangedEvent) -> AppResult<()> {
        self.enqueue(QueuedChange::Role(event)).await
    }

    async fn publish_player_roles_changed(&self, event: PlayerRolesChangedEvent) -> AppResult<()> {
        self.enqueue(QueuedChange::PlayerRoles(event)).await
    }
}
