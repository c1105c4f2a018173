use thiserror::Error;

/// Error type for JWT operations.
///
/// Every validation variant maps to the same "unauthorized" outcome at an
/// HTTP boundary; the variants exist so callers can log and test the kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Signing configuration error: {0}")]
    SigningConfig(String),

    #[error("Authorization header is missing or malformed")]
    MalformedAuthHeader,

    #[error("Authorization scheme is not Bearer")]
    UnsupportedScheme,

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,
}
