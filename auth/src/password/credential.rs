use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use zeroize::Zeroizing;

/// Plaintext password supplied by a client.
///
/// Lives only for the duration of a hash or verify call. The buffer is
/// wiped on drop and `Debug` never prints it. Not serializable.
pub struct Credential(Zeroizing<String>);

impl Credential {
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(Zeroizing::new(plaintext.into()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl<'de> Deserialize<'de> for Credential {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Credential::new)
    }
}

/// Argon2 hash of a credential in PHC string format.
///
/// Carries algorithm, cost parameters and salt alongside the digest. Like
/// [`Credential`] it cannot be serialized, so it never ends up in a response
/// body; storage adapters read it through [`StoredHash::as_str`].
#[derive(Clone, PartialEq, Eq)]
pub struct StoredHash(String);

impl StoredHash {
    /// Wrap a hash loaded from storage. No validation happens here;
    /// a corrupt value surfaces as `VerificationFailed` on first use.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for StoredHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoredHash(<redacted>)")
    }
}
