use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SigningSecret;

/// Authorization scheme accepted by [`TokenValidator::validate`].
pub const BEARER_SCHEME: &str = "Bearer";

/// Verifies bearer tokens produced by a [`TokenIssuer`](super::TokenIssuer)
/// sharing the same secret.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand so that `now >= exp` rejects with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: secret.decoding_key(),
            validation,
        }
    }

    /// Validate the raw value of an `Authorization` header.
    ///
    /// # Errors
    /// * `MalformedAuthHeader` - No header, or no token after the scheme
    /// * `UnsupportedScheme` - Scheme is not `Bearer`
    /// * `MalformedToken` - Token is not a well-formed HS256 JWT with our claims
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `TokenExpired` - Current time is at or past `exp`
    pub fn validate(&self, authorization: Option<&str>) -> Result<Claims, JwtError> {
        self.validate_at(authorization, Utc::now())
    }

    pub fn validate_at(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Claims, JwtError> {
        let token = bearer_token(authorization)?;
        self.validate_token_at(token, now)
    }

    /// Validate a bare token (no scheme prefix).
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token_at(token, Utc::now())
    }

    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::MalformedToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

/// Extract the token from an `Authorization` header value of the form
/// `Bearer <token>`.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, JwtError> {
    let header = authorization
        .map(str::trim)
        .filter(|header| !header.is_empty())
        .ok_or(JwtError::MalformedAuthHeader)?;

    let (scheme, token) = header.split_once(' ').unwrap_or((header, ""));
    if scheme != BEARER_SCHEME {
        return Err(JwtError::UnsupportedScheme);
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(JwtError::MalformedAuthHeader);
    }

    Ok(token)
}
