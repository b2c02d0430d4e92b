use std::collections::BTreeSet;

use permission_domain::PermissionNode;

/// Input payload for creating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role identifier.
    pub id: String,
    /// Display-resolution priority.
    pub priority: u32,
    /// Optional display-name template.
    pub display_name: Option<String>,
}

/// Partial update of a role; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// Replacement priority.
    pub priority: Option<u32>,
    /// Replacement display-name template.
    pub display_name: Option<String>,
    /// Nodes to insert or overwrite, applied after `unset_permissions`.
    pub set_permissions: Vec<PermissionNode>,
    /// Node keys to remove; absent keys are ignored.
    pub unset_permissions: Vec<String>,
}

/// Role membership of a player together with the resolved display role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRoles {
    /// Assigned role identifiers in ascending order.
    pub role_ids: BTreeSet<String>,
    /// Identifier of the active display role, if any held role has a display name.
    pub active_display_role_id: Option<String>,
    /// Display name of the active role rendered for the requested username.
    pub active_display_name: Option<String>,
}
