use permission_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Grant state of a single permission node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionState {
    /// The node is granted.
    Allow,
    /// The node is explicitly denied.
    Deny,
}

/// A single allow/deny grant keyed by a dotted node string such as `admin.ban`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionNode {
    node: NonEmptyString,
    state: PermissionState,
}

impl PermissionNode {
    /// Creates a validated permission node.
    pub fn new(node: impl Into<String>, state: PermissionState) -> AppResult<Self> {
        let node = NonEmptyString::new(node)
            .map_err(|_| AppError::Validation("permission node must not be empty".to_owned()))?;

        Ok(Self { node, state })
    }

    /// Returns the node key.
    #[must_use]
    pub fn node(&self) -> &str {
        self.node.as_str()
    }

    /// Returns the grant state.
    #[must_use]
    pub fn state(&self) -> PermissionState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: PermissionState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::{PermissionNode, PermissionState};

    #[test]
    fn empty_node_is_rejected() {
        assert!(PermissionNode::new("", PermissionState::Allow).is_err());
        assert!(PermissionNode::new("  ", PermissionState::Deny).is_err());
    }
}
