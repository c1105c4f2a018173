use auth::Credential;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .login_service
        .login(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

/// Login key and plaintext password. The password is wiped when the
/// request body is dropped.
#[derive(Debug, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: Credential,
}

impl From<LoginRequestBody> for LoginCommand {
    fn from(body: LoginRequestBody) -> Self {
        LoginCommand {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: UserData,
}

impl From<&LoginOutcome> for LoginResponseData {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            token: outcome.token.access_token.clone(),
            expires_at: outcome.token.claims.expires_at(),
            user: (&outcome.user).into(),
        }
    }
}
