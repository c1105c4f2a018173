use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

/// Identity established by a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Per-request context handed to protected handlers through request
/// extensions.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<AuthenticatedUser>,
}

impl RequestContext {
    pub fn with_identity(self, identity: AuthenticatedUser) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&AuthenticatedUser> {
        self.identity.as_ref()
    }
}

/// Why the gate turned a request away. All of these become the same 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error(transparent)]
    Token(#[from] JwtError),

    #[error("Token subject is not a user id")]
    InvalidSubject,
}

/// Validate `authorization` and return `context` extended with the caller's
/// identity.
///
/// # Errors
/// * `Token` - Header or token rejected by the validator
/// * `InvalidSubject` - Token is valid but `sub` is not a user id
pub fn admit(
    authenticator: &Authenticator,
    context: RequestContext,
    authorization: Option<&str>,
) -> Result<RequestContext, GateRejection> {
    let claims = authenticator.validate_authorization(authorization)?;
    let user_id = UserId::from_string(&claims.sub).map_err(|_| GateRejection::InvalidSubject)?;

    Ok(context.with_identity(AuthenticatedUser {
        user_id,
        issued_at: claims.issued_at(),
        expires_at: claims.expires_at(),
    }))
}

/// Middleware guarding protected routes. The wrapped handler only runs
/// once [`admit`] has succeeded.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let context = req
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();

    let admitted = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| JwtError::MalformedAuthHeader))
        .transpose()
        .map_err(GateRejection::from)
        .and_then(|authorization| admit(&authenticator, context, authorization));

    let context = admitted.map_err(|rejection| {
        tracing::warn!(
            method = %req.method(),
            uri = %req.uri(),
            "Request rejected: {}",
            rejection
        );
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
