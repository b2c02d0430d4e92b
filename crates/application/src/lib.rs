//! Application services and ports.

#![forbid(unsafe_code)]

mod announce;
mod membership_service;
mod permission_ports;
mod role_service;

#[cfg(test)]
mod test_fakes;

pub use membership_service::MembershipService;
pub use permission_ports::{
    ChangeNotifier, CreateRoleInput, PlayerRoleRepository, PlayerRoles, PlayerRolesChangedEvent,
    RoleChangedEvent, RoleRepository, RoleSetChange, UpdateRoleInput,
};
pub use role_service::RoleService;
