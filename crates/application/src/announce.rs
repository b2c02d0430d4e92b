//! Best-effort publication of committed mutations.

use tracing::warn;

use crate::{ChangeNotifier, PlayerRolesChangedEvent, RoleChangedEvent};

/// Publishes a role change, logging and discarding any failure.
pub(crate) async fn announce_role_changed(notifier: &dyn ChangeNotifier, event: RoleChangedEvent) {
    let change_type = event.change_type;
    let role_id = event
        .role
        .as_ref()
        .map(|role| role.id().to_owned())
        .unwrap_or_default();

    if let Err(error) = notifier.publish_role_changed(event).await {
        warn!(
            role_id = %role_id,
            change_type = change_type.as_str(),
            error = %error,
            "failed to publish role change"
        );
    }
}

/// Publishes a player role-set change, logging and discarding any failure.
pub(crate) async fn announce_player_roles_changed(
    notifier: &dyn ChangeNotifier,
    event: PlayerRolesChangedEvent,
) {
    let player_id = event.player_id;
    let role_id = event.role_id.clone();
    let change_type = event.change_type;

    if let Err(error) = notifier.publish_player_roles_changed(event).await {
        warn!(
            player_id = %player_id,
            role_id = %role_id,
            change_type = change_type.as_str(),
            error = %error,
            "failed to publish player roles change"
        );
    }
}
