use async_trait::async_trait;
use auth::Credential;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::StoredHash;

use crate::domain::user::ports::CredentialHasher;

/// Argon2id hashing, run on the blocking pool.
#[async_trait]
impl CredentialHasher for PasswordHasher {
    async fn hash(&self, credential: Credential) -> Result<StoredHash, PasswordError> {
        self.hash_async(credential).await
    }
}
