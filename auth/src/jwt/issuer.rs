use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SigningSecret;

/// Lifetime of every issued access token.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Signed access token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS serialization, ready for an `Authorization: Bearer` header
    pub access_token: String,
    pub claims: Claims,
}

/// Mints HS256 access tokens with a fixed one hour lifetime.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: secret.encoding_key(),
            algorithm: Algorithm::HS256,
            ttl: Duration::seconds(TOKEN_TTL_SECONDS),
        }
    }

    /// Issue a token for `subject`, valid from now for one hour.
    ///
    /// # Errors
    /// * `SigningConfig` - Token could not be signed with the configured secret
    pub fn issue(&self, subject: impl ToString) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// Output is fully determined by subject, `now` and the secret.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, now, self.ttl);
        let header = Header::new(self.algorithm);

        let access_token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningConfig(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }
}
