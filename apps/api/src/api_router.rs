use axum::Router;
use axum::routing::{delete, get, patch};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let role_routes = Router::new()
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            patch(handlers::roles::update_role_handler),
        );

    let player_routes = Router::new()
        .route(
            "/api/players/{player_id}/roles",
            get(handlers::players::player_roles_handler)
                .post(handlers::players::add_role_to_player_handler),
        )
        .route(
            "/api/players/{player_id}/roles/{role_id}",
            delete(handlers::players::remove_role_from_player_handler),
        );

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(role_routes)
        .merge(player_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
