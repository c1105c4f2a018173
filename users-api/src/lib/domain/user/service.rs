use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::ListUsersFilter;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::CredentialHasher;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    repository: Arc<UR>,
    password_hasher: Arc<CH>,
}

impl<UR, CH> UserService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher configured with the deployment's cost parameters
    pub fn new(repository: Arc<UR>, password_hasher: Arc<CH>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    fn ensure_owner(actor: &UserId, id: &UserId) -> Result<(), UserError> {
        if actor == id {
            Ok(())
        } else {
            Err(UserError::Forbidden {
                actor: actor.to_string(),
                target: id.to_string(),
            })
        }
    }
}

#[async_trait]
impl<UR, CH> UserServicePort for UserService<UR, CH>
where
    UR: UserRepository,
    CH: CredentialHasher,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<PublicUser, UserError> {
        let CreateUserCommand {
            firstname,
            lastname,
            email,
            city,
            language,
            password,
        } = command;

        // Plaintext is consumed here and wiped once hashing finishes
        let password_hash = self.password_hasher.hash(password).await?;

        let user = User {
            id: UserId::new(),
            firstname,
            lastname,
            email,
            city,
            language,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user.into_public())
    }

    async fn get_user(&self, id: &UserId) -> Result<PublicUser, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(User::into_public)
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self, filter: &ListUsersFilter) -> Result<Vec<PublicUser>, UserError> {
        let users = self.repository.list(filter).await?;
        Ok(users.into_iter().map(User::into_public).collect())
    }

    async fn update_user(
        &self,
        actor: &UserId,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<(), UserError> {
        Self::ensure_owner(actor, id)?;

        self.repository.update(id, &command).await?;
        tracing::info!(user_id = %id, "User updated");

        Ok(())
    }

    async fn delete_user(&self, actor: &UserId, id: &UserId) -> Result<(), UserError> {
        Self::ensure_owner(actor, id)?;

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::Credential;
    use auth::HashingParams;
    use auth::PasswordError;
    use auth::StoredHash;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::PersonName;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn list(&self, filter: &ListUsersFilter) -> Result<Vec<User>, UserError>;
            async fn update(&self, id: &UserId, command: &UpdateUserCommand) -> Result<(), UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestCredentialHasher {}

        #[async_trait]
        impl CredentialHasher for TestCredentialHasher {
            async fn hash(&self, credential: Credential) -> Result<StoredHash, PasswordError>;
        }
    }

    fn hasher() -> Arc<auth::PasswordHasher> {
        Arc::new(
            auth::PasswordHasher::with_params(HashingParams {
                memory_cost: 1024,
                time_cost: 1,
                parallelism: 1,
            })
            .unwrap(),
        )
    }

    fn create_command() -> CreateUserCommand {
        CreateUserCommand {
            firstname: PersonName::new("Ada".to_string()).unwrap(),
            lastname: PersonName::new("Lovelace".to_string()).unwrap(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            city: None,
            language: None,
            password: Credential::new("correct-horse"),
        }
    }

    fn stored_user(id: UserId, email: &str, city: &str) -> User {
        User {
            id,
            firstname: PersonName::new("Ada".to_string()).unwrap(),
            lastname: PersonName::new("Lovelace".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            city: Some(city.to_string()),
            language: None,
            password_hash: StoredHash::new("$argon2id$test_hash"),
            created_at: Utc::now(),
        }
    }

    fn update_command() -> UpdateUserCommand {
        UpdateUserCommand {
            firstname: PersonName::new("Grace".to_string()).unwrap(),
            lastname: PersonName::new("Hopper".to_string()).unwrap(),
            email: EmailAddress::new("grace@example.com".to_string()).unwrap(),
            city: None,
            language: Some("COBOL".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "ada@example.com"
                    && user.password_hash.as_str().starts_with("$argon2id$")
                    && !user.password_hash.as_str().contains("correct-horse")
            })
            .times(1)
            .returning(Ok);

        let service = UserService::new(Arc::new(repository), hasher());

        let command = CreateUserCommand {
            firstname: PersonName::new("Ada".to_string()).unwrap(),
            lastname: PersonName::new("Lovelace".to_string()).unwrap(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            city: Some("London".to_string()),
            language: None,
            password: Credential::new("correct-horse"),
        };

        let user = service.create_user(command).await.expect("Failed to create");
        assert_eq!(user.email.as_str(), "ada@example.com");
        assert_eq!(user.city.as_deref(), Some("London"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()))
        });

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.create_user(create_command()).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_user_hashing_failure() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(0);

        let mut password_hasher = MockTestCredentialHasher::new();
        password_hasher
            .expect_hash()
            .times(1)
            .returning(|_| Err(PasswordError::HashingFailed("out of memory".to_string())));

        let service = UserService::new(Arc::new(repository), Arc::new(password_hasher));

        let result = service.create_user(create_command()).await;
        assert!(matches!(
            result,
            Err(UserError::Password(PasswordError::HashingFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        let returned_user = stored_user(user_id, "ada@example.com", "London");
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), hasher());

        let user = service.get_user(&user_id).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.firstname.as_str(), "Ada");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_passes_filter() {
        let mut repository = MockTestUserRepository::new();

        let users = vec![
            stored_user(UserId::new(), "ada@example.com", "London"),
            stored_user(UserId::new(), "charles@example.com", "London"),
        ];
        repository
            .expect_list()
            .withf(|filter| filter.city.as_deref() == Some("London") && filter.language.is_none())
            .times(1)
            .returning(move |_| Ok(users.clone()));

        let service = UserService::new(Arc::new(repository), hasher());

        let filter = ListUsersFilter {
            city: Some("London".to_string()),
            language: None,
        };
        let result = service.list_users(&filter).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        repository
            .expect_update()
            .withf(move |id, command| {
                *id == user_id && command.email.as_str() == "grace@example.com"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service
            .update_user(&user_id, &user_id, update_command())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_other_user_is_forbidden() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service
            .update_user(&UserId::new(), &UserId::new(), update_command())
            .await;
        assert!(matches!(result, Err(UserError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        repository
            .expect_update()
            .times(1)
            .returning(move |id, _| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service
            .update_user(&user_id, &user_id, update_command())
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        repository
            .expect_delete()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.delete_user(&user_id, &user_id).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_other_user_is_forbidden() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_delete().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.delete_user(&UserId::new(), &UserId::new()).await;
        assert!(matches!(result, Err(UserError::Forbidden { .. })));
    }
}
