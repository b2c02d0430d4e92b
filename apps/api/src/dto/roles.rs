use permission_application::{CreateRoleInput, UpdateRoleInput};
use permission_core::AppError;
use permission_domain::{PermissionNode, PermissionState, Role};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Grant state of a permission node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-state.ts"
)]
pub enum PermissionStateDto {
    Allow,
    Deny,
}

/// API representation of a permission node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-node-dto.ts"
)]
pub struct PermissionNodeDto {
    pub node: String,
    pub state: PermissionStateDto,
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: String,
    pub priority: u32,
    pub display_name: Option<String>,
    pub permissions: Vec<PermissionNodeDto>,
}

/// Every role known to the service.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/roles-response.ts"
)]
pub struct RolesResponse {
    pub roles: Vec<RoleResponse>,
}

/// A single role returned by create and update.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-envelope-response.ts"
)]
pub struct RoleEnvelopeResponse {
    pub role: RoleResponse,
}

/// Incoming payload for role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub id: String,
    pub priority: u32,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Incoming payload for a partial role update.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub set_permissions: Vec<PermissionNodeDto>,
    #[serde(default)]
    pub unset_permissions: Vec<String>,
}

impl From<PermissionState> for PermissionStateDto {
    fn from(value: PermissionState) -> Self {
        match value {
            PermissionState::Allow => Self::Allow,
            PermissionState::Deny => Self::Deny,
        }
    }
}

impl From<PermissionStateDto> for PermissionState {
    fn from(value: PermissionStateDto) -> Self {
        match value {
            PermissionStateDto::Allow => Self::Allow,
            PermissionStateDto::Deny => Self::Deny,
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            id: value.id().to_owned(),
            priority: value.priority(),
            display_name: value.display_name().map(ToOwned::to_owned),
            permissions: value
                .permissions()
                .iter()
                .map(|permission| PermissionNodeDto {
                    node: permission.node().to_owned(),
                    state: permission.state().into(),
                })
                .collect(),
        }
    }
}

impl From<CreateRoleRequest> for CreateRoleInput {
    fn from(value: CreateRoleRequest) -> Self {
        Self {
            id: value.id,
            priority: value.priority,
            display_name: value.display_name,
        }
    }
}

impl TryFrom<UpdateRoleRequest> for UpdateRoleInput {
    type Error = AppError;

    fn try_from(value: UpdateRoleRequest) -> Result<Self, Self::Error> {
        let set_permissions = value
            .set_permissions
            .into_iter()
            .map(|permission| PermissionNode::new(permission.node, permission.state.into()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            priority: value.priority,
            display_name: value.display_name,
            set_permissions,
            unset_permissions: value.unset_permissions,
        })
    }
}
