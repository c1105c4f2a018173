use auth::Credential;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<([(HeaderName, String); 1], ApiSuccess<UserData>), ApiError> {
    let user = state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    let location = format!("/api/users/{}", user.id);

    Ok((
        [(header::LOCATION, location)],
        ApiSuccess::new(StatusCode::CREATED, (&user).into()),
    ))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    firstname: String,
    lastname: String,
    email: String,
    city: Option<String>,
    language: Option<String>,
    password: Credential,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password must not be empty")]
    EmptyPassword,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseCreateUserRequestError> {
        if self.password.is_empty() {
            return Err(ParseCreateUserRequestError::EmptyPassword);
        }

        Ok(CreateUserCommand {
            firstname: PersonName::new(self.firstname)?,
            lastname: PersonName::new(self.lastname)?,
            email: EmailAddress::new(self.email)?,
            city: self.city,
            language: self.language,
            password: self.password,
        })
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
