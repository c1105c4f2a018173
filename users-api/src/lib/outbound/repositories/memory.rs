use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ListUsersFilter;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store. Used by tests and when no database is
/// configured; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<UserId, User>, email: &EmailAddress, except: Option<&UserId>) -> bool {
    users
        .values()
        .any(|user| &user.email == email && Some(&user.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, None) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn list(&self, filter: &ListUsersFilter) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect();

        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, id: &UserId, command: &UpdateUserCommand) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        if email_taken(&users, &command.email, Some(id)) {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.firstname = command.firstname.clone();
        user.lastname = command.lastname.clone();
        user.email = command.email.clone();
        user.city = command.city.clone();
        user.language = command.language.clone();

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::StoredHash;
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::PersonName;

    fn user(email: &str, city: Option<&str>, language: Option<&str>) -> User {
        User {
            id: UserId::new(),
            firstname: PersonName::new("Ada".to_string()).unwrap(),
            lastname: PersonName::new("Lovelace".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            city: city.map(str::to_string),
            language: language.map(str::to_string),
            password_hash: StoredHash::new("$argon2id$stored"),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();
        let created = repository
            .create(user("ada@example.com", None, None))
            .await
            .unwrap();

        let by_id = repository.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, created.email);
        assert_eq!(by_id.password_hash, created.password_hash);

        let by_email = repository
            .find_by_email(&created.email)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);

        let missing = EmailAddress::new("nobody@example.com".to_string()).unwrap();
        assert!(repository.find_by_email(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("ada@example.com", None, None))
            .await
            .unwrap();

        let result = repository.create(user("ada@example.com", None, None)).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_list_filters_and_order() {
        let repository = InMemoryUserRepository::new();

        let mut older = user("ada@example.com", Some("London"), Some("English"));
        older.created_at = Utc::now() - Duration::days(1);
        let older_id = older.id;
        repository.create(older).await.unwrap();

        let newer = repository
            .create(user("grace@example.com", Some("London"), Some("COBOL")))
            .await
            .unwrap();
        repository
            .create(user("alan@example.com", Some("Manchester"), Some("English")))
            .await
            .unwrap();

        let london = repository
            .list(&ListUsersFilter {
                city: Some("London".to_string()),
                language: None,
            })
            .await
            .unwrap();
        let ids: Vec<UserId> = london.iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![newer.id, older_id]);

        let london_english = repository
            .list(&ListUsersFilter {
                city: Some("London".to_string()),
                language: Some("English".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(london_english.len(), 1);
        assert_eq!(london_english[0].id, older_id);

        let everyone = repository.list(&ListUsersFilter::default()).await.unwrap();
        assert_eq!(everyone.len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_password_hash() {
        let repository = InMemoryUserRepository::new();
        let created = repository
            .create(user("ada@example.com", None, None))
            .await
            .unwrap();

        let command = UpdateUserCommand {
            firstname: PersonName::new("Augusta".to_string()).unwrap(),
            lastname: PersonName::new("King".to_string()).unwrap(),
            email: EmailAddress::new("augusta@example.com".to_string()).unwrap(),
            city: Some("London".to_string()),
            language: None,
        };
        repository.update(&created.id, &command).await.unwrap();

        let updated = repository.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(updated.firstname.as_str(), "Augusta");
        assert_eq!(updated.email.as_str(), "augusta@example.com");
        assert_eq!(updated.password_hash, created.password_hash);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_rejected() {
        let repository = InMemoryUserRepository::new();
        repository
            .create(user("ada@example.com", None, None))
            .await
            .unwrap();
        let grace = repository
            .create(user("grace@example.com", None, None))
            .await
            .unwrap();

        let command = UpdateUserCommand {
            firstname: grace.firstname.clone(),
            lastname: grace.lastname.clone(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            city: None,
            language: None,
        };
        let result = repository.update(&grace.id, &command).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_user() {
        let repository = InMemoryUserRepository::new();
        let id = UserId::new();

        let command = UpdateUserCommand {
            firstname: PersonName::new("Ada".to_string()).unwrap(),
            lastname: PersonName::new("Lovelace".to_string()).unwrap(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            city: None,
            language: None,
        };
        assert!(matches!(
            repository.update(&id, &command).await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            repository.delete(&id).await,
            Err(UserError::NotFound(_))
        ));
    }
}
