use std::fmt;
use std::str::FromStr;

use auth::Credential;
use auth::StoredHash;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// The only type that carries the stored password hash. Anything that
/// leaves the service goes through [`User::into_public`] first.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub email: EmailAddress,
    pub city: Option<String>,
    pub language: Option<String>,
    pub password_hash: StoredHash,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Drop the password hash, keeping every other field.
    pub fn into_public(self) -> PublicUser {
        let User {
            id,
            firstname,
            lastname,
            email,
            city,
            language,
            password_hash: _,
            created_at,
        } = self;

        PublicUser {
            id,
            firstname,
            lastname,
            email,
            city,
            language,
            created_at,
        }
    }
}

/// User as seen by clients: no credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: UserId,
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub email: EmailAddress,
    pub city: Option<String>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of a user.
///
/// Trimmed, non-empty, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Name is empty after trimming
    /// * `TooLong` - Name is longer than 255 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Doubles as the
/// login key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub email: EmailAddress,
    pub city: Option<String>,
    pub language: Option<String>,
    /// Plaintext password, hashed by the service and then dropped
    pub password: Credential,
}

/// Command to replace the profile fields of an existing user.
///
/// The password hash is never touched by an update.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub firstname: PersonName,
    pub lastname: PersonName,
    pub email: EmailAddress,
    pub city: Option<String>,
    pub language: Option<String>,
}

/// Equality filters for listing users. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsersFilter {
    pub city: Option<String>,
    pub language: Option<String>,
}

impl ListUsersFilter {
    pub fn matches(&self, user: &User) -> bool {
        let city_matches = self
            .city
            .as_ref()
            .map_or(true, |city| user.city.as_ref() == Some(city));
        let language_matches = self
            .language
            .as_ref()
            .map_or(true, |language| user.language.as_ref() == Some(language));

        city_matches && language_matches
    }
}
