use permission_application::{MembershipService, RoleService};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_service: RoleService,
    pub membership_service: MembershipService,
    pub postgres_pool: Option<PgPool>,
}
