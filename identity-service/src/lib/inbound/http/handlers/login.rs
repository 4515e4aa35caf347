use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let outcome = state
        .identity_service
        .login(&body.username, &body.password)
        .await
        .map_err(ApiError::from)?;

    // Unknown username and wrong password share this one rejection
    match outcome {
        Some(ref outcome) => Ok(ApiSuccess::new(StatusCode::OK, outcome.into())),
        None => Err(ApiError::Unauthorized(
            "Incorrect username or password".to_string(),
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub user: UserData,
}

impl From<&LoginOutcome> for LoginResponseData {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            access_token: outcome.access_token.clone(),
            token_type: "bearer".to_string(),
            user: (&outcome.user).into(),
        }
    }
}
