use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::IdentityServicePort;
use crate::inbound::http::bearer::bearer_token;
use crate::inbound::http::router::AppState;

pub async fn deactivate_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .identity_service
        .require_role(bearer_token(&headers), Role::Admin)
        .await
        .map_err(ApiError::from)?;

    let user_id = UserId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .identity_service
        .deactivate_user(user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
