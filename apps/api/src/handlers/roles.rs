use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateRoleRequest, RoleEnvelopeResponse, RoleResponse, RolesResponse, UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(State(state): State<AppState>) -> ApiResult<Json<RolesResponse>> {
    let roles = state
        .role_service
        .list_roles()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(RolesResponse { roles }))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleEnvelopeResponse>)> {
    let role = state.role_service.create_role(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RoleEnvelopeResponse {
            role: RoleResponse::from(role),
        }),
    ))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleEnvelopeResponse>> {
    let role = state
        .role_service
        .update_role(role_id.as_str(), payload.try_into()?)
        .await?;

    Ok(Json(RoleEnvelopeResponse {
        role: RoleResponse::from(role),
    }))
}
