use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Credential;
use auth::StoredHash;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::domain::auth::errors::LoginError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::ports::LoginServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Login orchestration: lookup, verify, issue.
///
/// Only reads from the repository. The authenticator is shared with the
/// request gate so both sides use the same signing secret.
pub struct LoginService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    decoy_hash: OnceCell<StoredHash>,
}

impl<UR> LoginService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            decoy_hash: OnceCell::new(),
        }
    }

    async fn lookup(&self, email: String) -> Result<Option<User>, LoginError> {
        match EmailAddress::new(email) {
            Ok(email) => Ok(self.repository.find_by_email(&email).await?),
            Err(_) => Ok(None),
        }
    }

    /// Spend one verification on a hash nobody owns, so an unknown
    /// identity costs the same as a wrong password.
    async fn verify_against_decoy(&self, credential: Credential) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| async {
                self.authenticator
                    .hash_password(Credential::new(Uuid::new_v4().to_string()))
                    .await
            })
            .await;

        let outcome = match decoy {
            Ok(hash) => self.authenticator.verify_password(hash, credential).await,
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            tracing::error!("Decoy verification failed: {}", e);
        }
    }
}

#[async_trait]
impl<UR> LoginServicePort for LoginService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, LoginError> {
        let LoginCommand { email, password } = command;

        let Some(user) = self.lookup(email).await? else {
            self.verify_against_decoy(password).await;
            tracing::warn!("Login rejected: unknown identity");
            return Err(LoginError::UnknownIdentity);
        };

        let token = self
            .authenticator
            .authenticate(password, &user.password_hash, &user.id.to_string())
            .await
            .map_err(|e| match e {
                AuthenticationError::BadCredential => {
                    tracing::warn!(user_id = %user.id, "Login rejected: bad credential");
                    LoginError::BadCredential
                }
                AuthenticationError::PasswordError(err) => LoginError::Password(err),
                AuthenticationError::JwtError(err) => LoginError::Token(err),
            })?;

        tracing::info!(user_id = %user.id, "Token issued");

        Ok(LoginOutcome {
            token,
            user: user.into_public(),
        })
    }
}
