use std::sync::Arc;

use permission_application::{ChangeNotifier, MembershipService, RoleService};

use crate::state::AppState;

use super::store::StoreHandles;

pub fn build_app_state(store: &StoreHandles, notifier: Arc<dyn ChangeNotifier>) -> AppState {
    AppState {
        role_service: RoleService::new(store.role_repository.clone(), notifier.clone()),
        membership_service: MembershipService::new(
            store.role_repository.clone(),
            store.player_repository.clone(),
            notifier,
        ),
        postgres_pool: store.postgres_pool.clone(),
    }
}
