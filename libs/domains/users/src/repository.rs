use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// Implementations assign ids; callers never supply one on create.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user and return the store-assigned id
    async fn create(&self, name: &str, date_of_birth: NaiveDate) -> UserResult<i32>;

    /// Get a user by id
    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// List users in primary-key order
    async fn list(&self, limit: u64, offset: u64) -> UserResult<Vec<User>>;

    /// Replace name and date of birth of an existing user
    ///
    /// Zero rows affected is indistinguishable from success; callers that
    /// care re-read the row afterwards.
    async fn update(&self, id: i32, name: &str, date_of_birth: NaiveDate) -> UserResult<()>;

    /// Delete a user by id; returns false when no row matched
    async fn delete(&self, id: i32) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: BTreeMap<i32, User>,
    next_id: i32,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, name: &str, date_of_birth: NaiveDate) -> UserResult<i32> {
        let mut state = self.state.write().await;

        state.next_id += 1;
        let id = state.next_id;
        state.users.insert(
            id,
            User {
                id,
                name: name.to_string(),
                date_of_birth,
            },
        );

        tracing::info!(user_id = id, "Created user");
        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn list(&self, limit: u64, offset: u64) -> UserResult<Vec<User>> {
        let state = self.state.read().await;

        // BTreeMap iteration order is id order
        let users: Vec<User> = state
            .users
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(users)
    }

    async fn update(&self, id: i32, name: &str, date_of_birth: NaiveDate) -> UserResult<()> {
        let mut state = self.state.write().await;

        if let Some(user) = state.users.get_mut(&id) {
            user.name = name.to_string();
            user.date_of_birth = date_of_birth;
            tracing::info!(user_id = id, "Updated user");
        }

        // A missing row is not an error here, matching the SQL UPDATE
        Ok(())
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let mut state = self.state.write().await;

        if state.users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
