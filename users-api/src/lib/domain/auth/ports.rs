use async_trait::async_trait;

use crate::domain::auth::errors::LoginError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;

/// Port for exchanging credentials for a bearer token.
#[async_trait]
pub trait LoginServicePort: Send + Sync + 'static {
    /// Look up the user by email, verify the password and issue a token.
    ///
    /// # Errors
    /// * `UnknownIdentity` - No user with that email
    /// * `BadCredential` - Password does not match
    /// * `Password` - Stored hash could not be verified
    /// * `Token` - Token could not be signed
    /// * `Repository` - Record store failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, LoginError>;
}
