mod inputs;
mod notifications;
mod repositories;

pub use inputs::{CreateRoleInput, PlayerRoles, UpdateRoleInput};
pub use notifications::{ChangeNotifier, PlayerRolesChangedEvent, RoleChangedEvent};
pub use repositories::{PlayerRoleRepository, RoleRepository, RoleSetChange};
