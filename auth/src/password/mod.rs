pub mod argon2;
pub mod credential;
pub mod errors;

pub use self::argon2::HashingParams;
pub use self::argon2::PasswordHasher;
pub use credential::Credential;
pub use credential::StoredHash;
pub use errors::PasswordError;
