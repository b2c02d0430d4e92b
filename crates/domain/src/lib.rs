//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod change;
mod payload;
mod permission;
mod player;
mod resolver;
mod role;

pub use change::{PlayerRolesChangeType, RoleChangeType};
pub use payload::{PermissionNodePayload, RolePayload};
pub use permission::{PermissionNode, PermissionState};
pub use player::Player;
pub use resolver::resolve_active_display_role;
pub use role::{DEFAULT_ROLE_ID, DEFAULT_ROLE_PRIORITY, Role, USERNAME_PLACEHOLDER};
