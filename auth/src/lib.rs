//! Authentication utilities library
//!
//! Provides the authentication core used by the users API:
//! - Password hashing (Argon2id, tunable costs, blocking-pool dispatch)
//! - JWT token issuance and validation (HS256, one hour lifetime)
//! - Authentication coordination
//!
//! Services define their own ports and adapt these implementations; nothing
//! in here knows about HTTP or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Credential, HashingParams, PasswordHasher};
//!
//! let params = HashingParams { memory_cost: 1024, time_cost: 1, parallelism: 1 };
//! let hasher = PasswordHasher::with_params(params).unwrap();
//! let hash = hasher.hash(&Credential::new("my_password")).unwrap();
//! let is_valid = hasher.verify(&hash, &Credential::new("my_password")).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{SigningSecret, TokenIssuer, TokenValidator};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let token = TokenIssuer::new(&secret).issue("user123").unwrap();
//! let header = format!("Bearer {}", token.access_token);
//! let claims = TokenValidator::new(&secret).validate(Some(&header)).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::SigningSecret;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::Credential;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::StoredHash;
