use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use serde::Deserialize;

use super::credential::Credential;
use super::credential::StoredHash;
use super::errors::PasswordError;

/// Argon2id cost parameters.
///
/// Fixed for the lifetime of a [`PasswordHasher`]; tuned per deployment,
/// never per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HashingParams {
    /// Memory cost in KiB
    #[serde(default = "HashingParams::default_memory_cost")]
    pub memory_cost: u32,

    /// Number of passes over memory
    #[serde(default = "HashingParams::default_time_cost")]
    pub time_cost: u32,

    /// Degree of parallelism (lanes)
    #[serde(default = "HashingParams::default_parallelism")]
    pub parallelism: u32,
}

impl HashingParams {
    pub const DEFAULT_MEMORY_COST: u32 = 1 << 16;
    pub const DEFAULT_TIME_COST: u32 = 5;
    pub const DEFAULT_PARALLELISM: u32 = 1;

    fn default_memory_cost() -> u32 {
        Self::DEFAULT_MEMORY_COST
    }

    fn default_time_cost() -> u32 {
        Self::DEFAULT_TIME_COST
    }

    fn default_parallelism() -> u32 {
        Self::DEFAULT_PARALLELISM
    }

    fn to_argon2_params(self) -> Result<Params, PasswordError> {
        Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))
    }
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_cost: Self::DEFAULT_MEMORY_COST,
            time_cost: Self::DEFAULT_TIME_COST,
            parallelism: Self::DEFAULT_PARALLELISM,
        }
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (Argon2id, version 0x13).
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: HashingParams,
}

impl PasswordHasher {
    /// Create a new password hasher with the default cost parameters.
    pub fn new() -> Self {
        Self {
            params: HashingParams::default(),
        }
    }

    /// Create a password hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(params: HashingParams) -> Result<Self, PasswordError> {
        params.to_argon2_params()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> HashingParams {
        self.params
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = self.params.to_argon2_params()?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a plaintext credential.
    ///
    /// A fresh random salt is drawn on every call, so hashing the same
    /// credential twice yields two different values.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, credential: &Credential) -> Result<StoredHash, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(credential.as_bytes(), &salt)
            .map(|hash| StoredHash::new(hash.to_string()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a credential against a stored hash.
    ///
    /// Salt and cost parameters are read from the stored hash itself.
    ///
    /// # Returns
    /// True if the credential matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed or carries unusable parameters
    pub fn verify(
        &self,
        stored_hash: &StoredHash,
        credential: &Credential,
    ) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(stored_hash.as_str()).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self
            .argon2()?
            .verify_password(credential.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    ///
    /// Keeps the async workers free while Argon2 burns memory and CPU.
    pub async fn hash_async(&self, credential: Credential) -> Result<StoredHash, PasswordError> {
        let hasher = self.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&credential))
            .await
            .map_err(|e| PasswordError::HashingFailed(format!("Hashing task failed: {}", e)))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    pub async fn verify_async(
        &self,
        stored_hash: StoredHash,
        credential: Credential,
    ) -> Result<bool, PasswordError> {
        let hasher = self.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&stored_hash, &credential))
            .await
            .map_err(|e| {
                PasswordError::VerificationFailed(format!("Verification task failed: {}", e))
            })?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
