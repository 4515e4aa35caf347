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

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user = state
        .identity_service
        .require_role(bearer_token(&headers), Role::Viewer)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}
