pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;
pub mod validator;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::TOKEN_TTL_SECONDS;
pub use secret::SigningSecret;
pub use validator::bearer_token;
pub use validator::TokenValidator;
