//! User operations: validation, uniqueness checks, repository access.

use std::sync::Arc;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{DUPLICATE_EMAIL, check_age, check_email, check_name};
use crate::domain::{Error, FieldErrors, NewUser, User, UserDraft, UserPatch, storage_error};

const USER_NOT_FOUND: &str = "user not found";

/// Use-case layer for the user resource.
///
/// Validation and uniqueness checks happen before any mutation; a request
/// with any failing field is rejected as a whole.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a service over the given repository.
    #[must_use]
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// All users, newest first.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        self.repo.list().await.map_err(storage_error)
    }

    /// Fetch one user.
    pub async fn get(&self, id: i32) -> Result<User, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    /// Validate and persist a new user.
    pub async fn create(&self, draft: UserDraft) -> Result<User, Error> {
        let mut errors = FieldErrors::new();
        let name = errors.collect("name", check_name(draft.name.as_deref()));
        let email = errors.collect("email", check_email(draft.email.as_deref()));
        let age = errors.collect("age", check_age(draft.age));

        if let Some(email) = email.as_deref() {
            if self
                .repo
                .email_taken(email, None)
                .await
                .map_err(storage_error)?
            {
                errors.push("email", DUPLICATE_EMAIL);
            }
        }
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }
        let (Some(name), Some(email), Some(age)) = (name, email, age) else {
            // Unreachable: empty errors imply every field was accepted.
            return Err(Error::internal("user validation produced no fields"));
        };

        match self.repo.insert(&NewUser { name, email, age }).await {
            Ok(user) => Ok(user),
            Err(UserPersistenceError::DuplicateEmail) => Err(Error::validation(
                FieldErrors::single("email", DUPLICATE_EMAIL),
            )),
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Validate and apply a partial update; absent fields stay unchanged.
    pub async fn update(&self, id: i32, draft: UserDraft) -> Result<User, Error> {
        if self
            .repo
            .find_by_id(id)
            .await
            .map_err(storage_error)?
            .is_none()
        {
            return Err(Error::not_found(USER_NOT_FOUND));
        }

        let mut errors = FieldErrors::new();
        let mut patch = UserPatch::default();
        if draft.name.is_some() {
            patch.name = errors.collect("name", check_name(draft.name.as_deref()));
        }
        if draft.email.is_some() {
            if let Some(email) = errors.collect("email", check_email(draft.email.as_deref())) {
                // Uniqueness among *other* users: the current id is excluded.
                if self
                    .repo
                    .email_taken(&email, Some(id))
                    .await
                    .map_err(storage_error)?
                {
                    errors.push("email", DUPLICATE_EMAIL);
                } else {
                    patch.email = Some(email);
                }
            }
        }
        if draft.age.is_some() {
            patch.age = errors.collect("age", check_age(draft.age));
        }
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        match self.repo.update(id, &patch).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Error::not_found(USER_NOT_FOUND)),
            Err(UserPersistenceError::DuplicateEmail) => Err(Error::validation(
                FieldErrors::single("email", DUPLICATE_EMAIL),
            )),
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Delete a user and, by cascade, every order it owns.
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        if self.repo.delete(id).await.map_err(storage_error)? {
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Service semantics over the in-memory repository.
    use std::time::Duration;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::test_support::{InMemoryStore, InMemoryUserRepository};

    fn service() -> UserService {
        let store = InMemoryStore::new();
        UserService::new(Arc::new(InMemoryUserRepository::new(store)))
    }

    fn draft(name: &str, email: &str, age: i64) -> UserDraft {
        UserDraft {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
            age: Some(age),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_equal_timestamps() {
        let service = service();
        let user = service
            .create(draft("Ada", "ada@example.com", 36))
            .await
            .expect("create user");

        assert_eq!(user.id, 1);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_naming_the_field() {
        let service = service();
        service
            .create(draft("Ada", "ada@example.com", 36))
            .await
            .expect("first create");

        let err = service
            .create(draft("Other", "ada@example.com", 40))
            .await
            .expect_err("duplicate email must fail");

        assert_eq!(err.code(), ErrorCode::Validation);
        let errors = err.field_errors().expect("field errors present");
        assert_eq!(
            errors.messages("email"),
            Some(&["a user with this email already exists".to_owned()][..])
        );
    }

    #[tokio::test]
    async fn create_aggregates_every_failing_field() {
        let service = service();
        let err = service
            .create(UserDraft {
                name: None,
                email: Some("not-an-email".to_owned()),
                age: Some(0),
            })
            .await
            .expect_err("all three fields fail");

        let errors = err.field_errors().expect("field errors present");
        assert!(errors.messages("name").is_some());
        assert!(errors.messages("email").is_some());
        assert!(errors.messages("age").is_some());
    }

    #[tokio::test]
    async fn age_boundaries_are_inclusive_end_to_end() {
        let service = service();
        assert!(
            service
                .create(draft("Min", "min@example.com", 1))
                .await
                .is_ok()
        );
        assert!(
            service
                .create(draft("Max", "max@example.com", 150))
                .await
                .is_ok()
        );
        assert!(
            service
                .create(draft("Low", "low@example.com", 0))
                .await
                .is_err()
        );
        assert!(
            service
                .create(draft("High", "high@example.com", 151))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_and_bumps_updated_at() {
        let service = service();
        let created = service
            .create(draft("Ada", "ada@example.com", 36))
            .await
            .expect("create user");

        // Ensure the refreshed timestamp is observably later.
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = service
            .update(
                created.id,
                UserDraft {
                    age: Some(37),
                    ..UserDraft::default()
                },
            )
            .await
            .expect("partial update");

        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.age, 37);
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn update_may_keep_own_email() {
        let service = service();
        let created = service
            .create(draft("Ada", "ada@example.com", 36))
            .await
            .expect("create user");

        let updated = service
            .update(
                created.id,
                UserDraft {
                    email: Some("ada@example.com".to_owned()),
                    ..UserDraft::default()
                },
            )
            .await
            .expect("own email is not a duplicate");
        assert_eq!(updated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn update_rejects_another_users_email() {
        let service = service();
        service
            .create(draft("Ada", "ada@example.com", 36))
            .await
            .expect("first user");
        let second = service
            .create(draft("Grace", "grace@example.com", 45))
            .await
            .expect("second user");

        let err = service
            .update(
                second.id,
                UserDraft {
                    email: Some("ada@example.com".to_owned()),
                    ..UserDraft::default()
                },
            )
            .await
            .expect_err("taken email must fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn missing_user_yields_not_found() {
        let service = service();
        let err = service.get(99_999).await.expect_err("unknown id");
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = service
            .update(99_999, UserDraft::default())
            .await
            .expect_err("unknown id");
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = service.delete(99_999).await.expect_err("unknown id");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let service = service();
        service
            .create(draft("First", "first@example.com", 20))
            .await
            .expect("first");
        service
            .create(draft("Second", "second@example.com", 30))
            .await
            .expect("second");

        let users = service.list().await.expect("list users");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "second@example.com");
        assert_eq!(users[1].email, "first@example.com");
    }
}
