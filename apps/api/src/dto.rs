mod players;
mod roles;

use serde::Serialize;
use ts_rs::TS;

pub use players::{AddRoleToPlayerRequest, PlayerRolesQuery, PlayerRolesResponse};
pub use roles::{
    CreateRoleRequest, RoleEnvelopeResponse, RoleResponse, RolesResponse, UpdateRoleRequest,
};
#[cfg(test)]
pub use roles::{PermissionNodeDto, PermissionStateDto};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub detail: Option<String>,
}
