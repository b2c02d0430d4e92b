//! JSON envelopes published by the outbound change notifiers.

use chrono::{DateTime, Utc};
use permission_application::{PlayerRolesChangedEvent, RoleChangedEvent};
use permission_core::{AppError, AppResult, PlayerId};
use permission_domain::{PlayerRolesChangeType, RoleChangeType, RolePayload};
use serde::Serialize;

/// Message body shared by every external notifier backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEventEnvelope {
    /// A role was created or modified.
    RoleChanged {
        /// Mutation kind.
        change_type: RoleChangeType,
        /// Role state after the mutation.
        role: Option<RolePayload>,
        /// Time the envelope was built.
        occurred_at: DateTime<Utc>,
    },
    /// A player's role set changed.
    PlayerRolesChanged {
        /// Mutation kind.
        change_type: PlayerRolesChangeType,
        /// Affected player.
        player_id: PlayerId,
        /// Role added or removed.
        role_id: String,
        /// Time the envelope was built.
        occurred_at: DateTime<Utc>,
    },
}

impl ChangeEventEnvelope {
    /// Returns the envelope discriminator.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoleChanged { .. } => "role_changed",
            Self::PlayerRolesChanged { .. } => "player_roles_changed",
        }
    }

    /// Serializes the envelope to its JSON wire form.
    pub fn encode(&self) -> AppResult<String> {
        serde_json::to_string(self).map_err(|error| {
            AppError::Internal(format!("failed to encode {} envelope: {error}", self.kind()))
        })
    }
}

impl From<&RoleChangedEvent> for ChangeEventEnvelope {
    fn from(value: &RoleChangedEvent) -> Self {
        Self::RoleChanged {
            change_type: value.change_type,
            role: value.role.as_ref().map(RolePayload::from),
            occurred_at: Utc::now(),
        }
    }
}

impl From<&PlayerRolesChangedEvent> for ChangeEventEnvelope {
    fn from(value: &PlayerRolesChangedEvent) -> Self {
        Self::PlayerRolesChanged {
            change_type: value.change_type,
            player_id: value.player_id,
            role_id: value.role_id.clone(),
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use permission_application::{PlayerRolesChangedEvent, RoleChangedEvent};
    use permission_core::PlayerId;
    use permission_domain::{PlayerRolesChangeType, Role, RoleChangeType};
    use serde_json::Value;

    use super::ChangeEventEnvelope;

    fn decode(envelope: &ChangeEventEnvelope) -> Value {
        let encoded = envelope.encode();
        let Ok(encoded) = encoded else {
            panic!("envelope should encode");
        };
        match serde_json::from_str(&encoded) {
            Ok(value) => value,
            Err(error) => panic!("envelope should be JSON: {error}"),
        }
    }

    #[test]
    fn role_envelope_carries_payload_and_change_type() {
        let Ok(role) = Role::new("admin", 50, Some("[Admin] {{username}}".to_owned())) else {
            panic!("role should be valid");
        };
        let envelope = ChangeEventEnvelope::from(&RoleChangedEvent {
            role: Some(role),
            change_type: RoleChangeType::Create,
        });

        let value = decode(&envelope);

        assert_eq!(envelope.kind(), "role_changed");
        assert_eq!(value["type"], "role_changed");
        assert_eq!(value["change_type"], "CREATE");
        assert_eq!(value["role"]["id"], "admin");
        assert_eq!(value["role"]["permissions"], serde_json::json!([]));
        assert!(value["occurred_at"].is_string());
    }

    #[test]
    fn role_envelope_without_role_encodes_null() {
        let envelope = ChangeEventEnvelope::from(&RoleChangedEvent {
            role: None,
            change_type: RoleChangeType::Modify,
        });

        let value = decode(&envelope);

        assert!(value["role"].is_null());
        assert_eq!(value["change_type"], "MODIFY");
    }

    #[test]
    fn player_envelope_carries_identifiers() {
        let player_id = PlayerId::new();
        let envelope = ChangeEventEnvelope::from(&PlayerRolesChangedEvent {
            player_id,
            role_id: "admin".to_owned(),
            change_type: PlayerRolesChangeType::Remove,
        });

        let value = decode(&envelope);

        assert_eq!(value["type"], "player_roles_changed");
        assert_eq!(value["change_type"], "REMOVE");
        assert_eq!(value["player_id"], player_id.to_string());
        assert_eq!(value["role_id"], "admin");
    }
}
