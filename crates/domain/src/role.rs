use std::collections::HashSet;

use permission_core::{AppError, AppResult, NonEmptyString};

use crate::permission::PermissionNode;

/// Reserved identifier of the role every player implicitly holds.
pub const DEFAULT_ROLE_ID: &str = "default";

/// Priority seeded for the default role; it loses every display-role tie-break.
///
/// Deployments migrated from the earlier document-store service seeded this
/// role at priority `0` with the template `{{.Username}}`. Such a record keeps
/// outranking every other role until it is updated to this priority and to
/// [`USERNAME_PLACEHOLDER`].
pub const DEFAULT_ROLE_PRIORITY: u32 = u32::MAX;

/// Placeholder substituted with the player's name when rendering display names.
pub const USERNAME_PLACEHOLDER: &str = "{{username}}";

/// A named, prioritized bundle of permission grants with an optional display name.
///
/// Lower `priority` values take precedence during display-role resolution.
/// Permission nodes are unique by key within a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    id: NonEmptyString,
    priority: u32,
    display_name: Option<String>,
    permissions: Vec<PermissionNode>,
}

impl Role {
    /// Creates a role with an empty permission set.
    pub fn new(
        id: impl Into<String>,
        priority: u32,
        display_name: Option<String>,
    ) -> AppResult<Self> {
        Self::with_permissions(id, priority, display_name, Vec::new())
    }

    /// Creates a role from stored parts, rejecting duplicate permission nodes.
    pub fn with_permissions(
        id: impl Into<String>,
        priority: u32,
        display_name: Option<String>,
        permissions: Vec<PermissionNode>,
    ) -> AppResult<Self> {
        let id = NonEmptyString::new(id)
            .map_err(|_| AppError::Validation("role id must not be empty".to_owned()))?;

        let mut seen = HashSet::with_capacity(permissions.len());
        for permission in &permissions {
            if !seen.insert(permission.node()) {
                return Err(AppError::Validation(format!(
                    "duplicate permission node '{}' in role '{}'",
                    permission.node(),
                    id
                )));
            }
        }

        Ok(Self {
            id,
            priority,
            display_name,
            permissions,
        })
    }

    /// Creates the baseline role seeded into every store.
    pub fn default_role() -> AppResult<Self> {
        Self::new(
            DEFAULT_ROLE_ID,
            DEFAULT_ROLE_PRIORITY,
            Some(USERNAME_PLACEHOLDER.to_owned()),
        )
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the display-resolution priority.
    #[must_use]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Returns the display-name template, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the permission nodes in insertion order.
    #[must_use]
    pub fn permissions(&self) -> &[PermissionNode] {
        &self.permissions
    }

    /// Overwrites the priority.
    pub fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }

    /// Overwrites the display-name template.
    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
    }

    /// Removes the node with the given key. Returns whether a node was removed.
    pub fn unset_permission(&mut self, node: &str) -> bool {
        let before = self.permissions.len();
        self.permissions
            .retain(|permission| permission.node() != node);
        self.permissions.len() != before
    }

    /// Overwrites the state of an existing node in place, or appends a new one.
    pub fn set_permission(&mut self, node: PermissionNode) {
        match self
            .permissions
            .iter_mut()
            .find(|existing| existing.node() == node.node())
        {
            Some(existing) => existing.set_state(node.state()),
            None => self.permissions.push(node),
        }
    }

    /// Renders the display-name template for a player.
    #[must_use]
    pub fn render_display_name(&self, username: &str) -> Option<String> {
        self.display_name
            .as_deref()
            .map(|template| template.replace(USERNAME_PLACEHOLDER, username))
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_ROLE_ID, Role};
    use crate::{PermissionNode, PermissionState};

    fn node(key: &str, state: PermissionState) -> PermissionNode {
        match PermissionNode::new(key, state) {
            Ok(node) => node,
            Err(error) => panic!("invalid test node: {error}"),
        }
    }

    #[test]
    fn duplicate_nodes_are_rejected() {
        let result = Role::with_permissions(
            "staff",
            10,
            None,
            vec![
                node("chat.mute", PermissionState::Allow),
                node("chat.mute", PermissionState::Deny),
            ],
        );

        assert!(result.is_err());
    }

    #[test]
    fn set_permission_overwrites_instead_of_duplicating() {
        let Ok(mut role) = Role::new("staff", 10, None) else {
            panic!("role should be valid");
        };
        role.set_permission(node("chat.mute", PermissionState::Allow));
        role.set_permission(node("chat.mute", PermissionState::Deny));

        assert_eq!(role.permissions().len(), 1);
        assert_eq!(role.permissions()[0].state(), PermissionState::Deny);
    }

    #[test]
    fn unset_permission_is_idempotent() {
        let Ok(mut role) = Role::new("staff", 10, None) else {
            panic!("role should be valid");
        };
        role.set_permission(node("chat.mute", PermissionState::Allow));

        assert!(role.unset_permission("chat.mute"));
        assert!(!role.unset_permission("chat.mute"));
        assert!(role.permissions().is_empty());
    }

    #[test]
    fn default_role_renders_the_player_name() {
        let Ok(role) = Role::default_role() else {
            panic!("default role should be valid");
        };

        assert_eq!(role.id(), DEFAULT_ROLE_ID);
        assert_eq!(role.render_display_name("Notch").as_deref(), Some("Notch"));
    }

    #[test]
    fn role_without_display_name_renders_nothing() {
        let Ok(role) = Role::new("hidden", 1, None) else {
            panic!("role should be valid");
        };

        assert_eq!(role.render_display_name("Notch"), None);
    }
}
