use std::fmt;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use zeroize::Zeroizing;

use super::errors::JwtError;

/// Process-wide HMAC signing secret.
///
/// Built once at startup and handed to the token issuer and validator.
/// The bytes are wiped on drop and never printed.
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    /// Minimum secret length for HS256 (256 bits).
    pub const MIN_LENGTH: usize = 32;

    /// Validate and wrap a secret.
    ///
    /// # Errors
    /// * `SigningConfig` - Secret is shorter than [`Self::MIN_LENGTH`] bytes
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, JwtError> {
        let secret = secret.as_ref();
        if secret.len() < Self::MIN_LENGTH {
            return Err(JwtError::SigningConfig(format!(
                "secret must be at least {} bytes, got {}",
                Self::MIN_LENGTH,
                secret.len()
            )));
        }

        Ok(Self(Zeroizing::new(secret.to_vec())))
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.0)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.0)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = SigningSecret::new("too-short");
        assert!(matches!(result, Err(JwtError::SigningConfig(_))));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(SigningSecret::new("").is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
        assert_eq!(format!("{:?}", secret), "SigningSecret(<redacted>)");
    }
}
