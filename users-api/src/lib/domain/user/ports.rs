use async_trait::async_trait;
use auth::Credential;
use auth::PasswordError;
use auth::StoredHash;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ListUsersFilter;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
///
/// Every user returned from here has had its password hash stripped.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user, hashing the supplied password.
    ///
    /// # Arguments
    /// * `command` - Validated profile fields and plaintext password
    ///
    /// # Returns
    /// Created user without credential material
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<PublicUser, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<PublicUser, UserError>;

    /// List users matching every filter that is set.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self, filter: &ListUsersFilter) -> Result<Vec<PublicUser>, UserError>;

    /// Replace the profile of `id` on behalf of `actor`.
    ///
    /// # Errors
    /// * `Forbidden` - `actor` is not `id`
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        actor: &UserId,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<(), UserError>;

    /// Delete `id` on behalf of `actor`.
    ///
    /// # Errors
    /// * `Forbidden` - `actor` is not `id`
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, actor: &UserId, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate (the record store).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user, including its stored hash, by login key.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve users matching the filter, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, filter: &ListUsersFilter) -> Result<Vec<User>, UserError>;

    /// Overwrite profile fields of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: &UserId, command: &UpdateUserCommand) -> Result<(), UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}

/// Turns a plaintext credential into the form kept in the record store.
#[async_trait]
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash `credential`, consuming it.
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing primitive or its worker failed
    async fn hash(&self, credential: Credential) -> Result<StoredHash, PasswordError>;
}
