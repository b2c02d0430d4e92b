use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use permission_core::PlayerId;

use crate::dto::{AddRoleToPlayerRequest, PlayerRolesQuery, PlayerRolesResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn player_roles_handler(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(query): Query<PlayerRolesQuery>,
) -> ApiResult<Json<PlayerRolesResponse>> {
    let player_id = PlayerId::parse(player_id.as_str())?;
    let player_roles = state
        .membership_service
        .player_roles(player_id, query.username.as_deref())
        .await?;

    Ok(Json(PlayerRolesResponse::from(player_roles)))
}

pub async fn add_role_to_player_handler(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(payload): Json<AddRoleToPlayerRequest>,
) -> ApiResult<StatusCode> {
    let player_id = PlayerId::parse(player_id.as_str())?;
    state
        .membership_service
        .add_role_to_player(player_id, payload.role_id.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_role_from_player_handler(
    State(state): State<AppState>,
    Path((player_id, role_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let player_id = PlayerId::parse(player_id.as_str())?;
    state
        .membership_service
        .remove_role_from_player(player_id, role_id.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
