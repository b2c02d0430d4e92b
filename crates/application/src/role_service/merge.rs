use permission_domain::Role;

use crate::UpdateRoleInput;

/// Applies partial-field overwrite and the permission merge to a role.
///
/// Unset runs before set so a node named in both lists ends up set.
pub(super) fn apply_role_update(role: &mut Role, input: UpdateRoleInput) {
    if let Some(priority) = input.priority {
        role.set_priority(priority);
    }
    if let Some(display_name) = input.display_name {
        role.set_display_name(Some(display_name));
    }

    for node in &input.unset_permissions {
        role.unset_permission(node);
    }

    for node in input.set_permissions {
        role.set_permission(node);
    }
}
