use auth::Role;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::IdentityServicePort;
use crate::inbound::http::bearer::bearer_token;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    state
        .identity_service
        .require_role(bearer_token(&headers), Role::Admin)
        .await
        .map_err(ApiError::from)?;

    let users = state
        .identity_service
        .list_active_users()
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserData::from).collect(),
    ))
}
