use permission_application::PlayerRoles;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Role membership of a player and the role shown next to their name.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/player-roles-response.ts"
)]
pub struct PlayerRolesResponse {
    pub role_ids: Vec<String>,
    pub active_display_role_id: Option<String>,
    pub active_display_name: Option<String>,
}

/// Query parameters for reading a player's roles.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerRolesQuery {
    pub username: Option<String>,
}

/// Incoming payload for granting a role to a player.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/add-role-to-player-request.ts"
)]
pub struct AddRoleToPlayerRequest {
    pub role_id: String,
}

impl From<PlayerRoles> for PlayerRolesResponse {
    fn from(value: PlayerRoles) -> Self {
        Self {
            role_ids: value.role_ids.into_iter().collect(),
            active_display_role_id: value.active_display_role_id,
            active_display_name: value.active_display_name,
        }
    }
}
