use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Failure kinds of a login attempt.
///
/// `UnknownIdentity` and `BadCredential` are distinguished here for logging
/// only. Both leave the service as the same 401.
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    #[error("No user for the supplied login key")]
    UnknownIdentity,

    #[error("Credential does not match")]
    BadCredential,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Repository error: {0}")]
    Repository(#[from] UserError),
}

impl LoginError {
    /// True for the kinds that are the caller's fault.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, LoginError::UnknownIdentity | LoginError::BadCredential)
    }
}
