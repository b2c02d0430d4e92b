use permission_core::AppError;
use serde::{Deserialize, Serialize};

use crate::permission::{PermissionNode, PermissionState};
use crate::role::Role;

/// Wire form of a permission node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionNodePayload {
    /// Dotted node key.
    pub node: String,
    /// Grant state.
    pub state: PermissionState,
}

/// Wire form of a role shared by the transport and the change notifier.
///
/// `permissions` is always emitted, as an empty array when the role has no
/// grants, and is read back as empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePayload {
    /// Role identifier.
    pub id: String,
    /// Display-resolution priority.
    pub priority: u32,
    /// Optional display-name template.
    pub display_name: Option<String>,
    /// Permission grants.
    #[serde(default)]
    pub permissions: Vec<PermissionNodePayload>,
}

impl From<&PermissionNode> for PermissionNodePayload {
    fn from(value: &PermissionNode) -> Self {
        Self {
            node: value.node().to_owned(),
            state: value.state(),
        }
    }
}

impl TryFrom<PermissionNodePayload> for PermissionNode {
    type Error = AppError;

    fn try_from(value: PermissionNodePayload) -> Result<Self, Self::Error> {
        PermissionNode::new(value.node, value.state)
    }
}

impl From<&Role> for RolePayload {
    fn from(value: &Role) -> Self {
        Self {
            id: value.id().to_owned(),
            priority: value.priority(),
            display_name: value.display_name().map(str::to_owned),
            permissions: value
                .permissions()
                .iter()
                .map(PermissionNodePayload::from)
                .collect(),
        }
    }
}

impl TryFrom<RolePayload> for Role {
    type Error = AppError;

    fn try_from(value: RolePayload) -> Result<Self, Self::Error> {
        let permissions = value
            .permissions
            .into_iter()
            .map(PermissionNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Role::with_permissions(value.id, value.priority, value.display_name, permissions)
    }
}
