use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::SigningSecret;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::Credential;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::StoredHash;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Holds the only copies of the signing secret (inside the issuer and the
/// validator) and is shared read-only between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    BadCredential,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with default hashing costs.
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_password_hasher(secret, PasswordHasher::new())
    }

    pub fn with_password_hasher(secret: &SigningSecret, password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(secret),
            token_validator: TokenValidator::new(secret),
        }
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }

    pub fn token_validator(&self) -> &TokenValidator {
        &self.token_validator
    }

    /// Hash a credential for storage, off the async workers.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub async fn hash_password(&self, credential: Credential) -> Result<StoredHash, PasswordError> {
        self.password_hasher.hash_async(credential).await
    }

    /// Check a credential against a stored hash, off the async workers.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed
    pub async fn verify_password(
        &self,
        stored_hash: &StoredHash,
        credential: Credential,
    ) -> Result<bool, PasswordError> {
        self.password_hasher
            .verify_async(stored_hash.clone(), credential)
            .await
    }

    /// Verify credentials and generate a token for `subject`.
    ///
    /// # Errors
    /// * `BadCredential` - Credential does not match the stored hash
    /// * `PasswordError` - Stored hash could not be used
    /// * `JwtError` - Token generation failed
    pub async fn authenticate(
        &self,
        credential: Credential,
        stored_hash: &StoredHash,
        subject: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.verify_password(stored_hash, credential).await? {
            return Err(AuthenticationError::BadCredential);
        }

        Ok(self.token_issuer.issue(subject)?)
    }

    /// Generate a token without password verification.
    ///
    /// # Errors
    /// * `SigningConfig` - Token could not be signed
    pub fn generate_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.token_issuer.issue(subject)
    }

    /// Validate the raw value of an `Authorization` header.
    pub fn validate_authorization(&self, authorization: Option<&str>) -> Result<Claims, JwtError> {
        self.token_validator.validate(authorization)
    }

    /// Validate a bare token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_validator.validate_token(token)
    }
}
