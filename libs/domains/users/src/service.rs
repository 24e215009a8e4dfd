use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, UserResponse, parse_date};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// Stateless: each call is one chain of store round-trips with no state
/// carried between calls.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    ///
    /// The date of birth is parsed here even though the extractor already
    /// validated it; a malformed date never reaches the store. The created
    /// row is read back by its assigned id so the response reflects what
    /// was actually persisted.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        let date_of_birth = parse_date(&input.dob)?;

        let id = self.repository.create(&input.name, date_of_birth).await?;

        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| UserError::Store(format!("user {} missing after insert", id)))?;

        UserResponse::from_user(&user)
    }

    /// Get a user by id
    pub async fn get_user(&self, id: i32) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        UserResponse::from_user(&user)
    }

    /// List users
    ///
    /// `limit`/`offset` pass through unclamped; clamping belongs to the
    /// HTTP boundary. The first row that fails to convert aborts the list.
    pub async fn list_users(&self, limit: u64, offset: u64) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list(limit, offset).await?;

        users.iter().map(UserResponse::from_user).collect()
    }

    /// Update a user (full replace of name and date of birth)
    ///
    /// The row is re-read with get semantics after the write, so a row that
    /// never existed or vanished concurrently surfaces as `NotFound`.
    pub async fn update_user(&self, id: i32, input: UpdateUser) -> UserResult<UserResponse> {
        let date_of_birth = parse_date(&input.dob)?;

        self.repository.update(id, &input.name, date_of_birth).await?;

        self.get_user(id).await
    }

    /// Delete a user
    ///
    /// Deleting a row that does not exist is `NotFound`.
    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, parse_date};
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn sample_user(id: i32) -> User {
        User {
            id,
            name: "Ada Lovelace".to_string(),
            date_of_birth: parse_date("1990-06-15").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_user_inserts_then_reads_back() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .with(eq("Ada Lovelace"), eq(parse_date("1990-06-15").unwrap()))
            .once()
            .returning(|_, _| Ok(7));
        repo.expect_get_by_id()
            .with(eq(7))
            .once()
            .returning(|id| Ok(Some(sample_user(id))));

        let service = UserService::new(repo);
        let response = service
            .create_user(CreateUser {
                name: "Ada Lovelace".to_string(),
                dob: "1990-06-15".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.id, 7);
        assert_eq!(response.dob, "1990-06-15");
    }

    #[tokio::test]
    async fn test_create_user_invalid_date_never_reaches_store() {
        // No expectations: any repository call would panic the test
        let repo = MockUserRepository::new();
        let service = UserService::new(repo);

        let err = service
            .create_user(CreateUser {
                name: "Ada Lovelace".to_string(),
                dob: "not-a-date".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn test_create_user_missing_after_insert_is_store_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().once().returning(|_, _| Ok(7));
        repo.expect_get_by_id().once().returning(|_| Ok(None));

        let service = UserService::new(repo);
        let err = service
            .create_user(CreateUser {
                name: "Ada Lovelace".to_string(),
                dob: "1990-06-15".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Store(_)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().with(eq(42)).returning(|_| Ok(None));

        let service = UserService::new(repo);
        let err = service.get_user(42).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_list_users_maps_rows() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .with(eq(10), eq(20))
            .once()
            .returning(|_, _| Ok(vec![sample_user(1), sample_user(2)]));

        let service = UserService::new(repo);
        let users = service.list_users(10, 20).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[1].id, 2);
    }

    #[tokio::test]
    async fn test_update_user_vanished_row_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().once().returning(|_, _, _| Ok(()));
        repo.expect_get_by_id().with(eq(42)).returning(|_| Ok(None));

        let service = UserService::new(repo);
        let err = service
            .update_user(
                42,
                UpdateUser {
                    name: "Ada King".to_string(),
                    dob: "1991-01-01".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_update_user_invalid_date_never_reaches_store() {
        let repo = MockUserRepository::new();
        let service = UserService::new(repo);

        let err = service
            .update_user(
                1,
                UpdateUser {
                    name: "Ada King".to_string(),
                    dob: "01-01-1991".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn test_delete_user_no_row_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(42)).returning(|_| Ok(false));

        let service = UserService::new(repo);
        let err = service.delete_user(42).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(7)).returning(|_| Ok(true));

        let service = UserService::new(repo);
        service.delete_user(7).await.unwrap();
    }
}
