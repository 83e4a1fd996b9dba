//! User storage
//!
//! Handlers depend on the [`UserStore`] trait, resolved from the container, so
//! the backing implementation can be swapped per test.

mod memory;

pub use memory::InMemoryUserStore;

use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserSummary};
use kit::{AppError, FrameworkError, HttpResponse};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("User not found")]
    NotFound(i64),

    #[error("Email already exists")]
    EmailTaken(String),

    #[error("user store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for FrameworkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::not_found(err.to_string()).into(),
            StoreError::EmailTaken(_) => AppError::conflict(err.to_string()).into(),
            StoreError::Poisoned => FrameworkError::internal(err.to_string()),
        }
    }
}

impl From<StoreError> for HttpResponse {
    fn from(err: StoreError) -> Self {
        FrameworkError::from(err).into()
    }
}

/// Ordered collection of users with a monotonically increasing ID counter
///
/// Email uniqueness is enforced by `create` and `update`. IDs are never reused.
pub trait UserStore: Send + Sync {
    /// All users in insertion order
    fn list(&self) -> Result<Vec<User>, StoreError>;

    fn get(&self, id: i64) -> Result<User, StoreError>;

    /// Append a user with the next ID and the current time
    fn create(&self, input: CreateUserRequest) -> Result<User, StoreError>;

    /// Apply a partial update; nothing is written if the new email is taken
    fn update(&self, id: i64, changes: UpdateUserRequest) -> Result<User, StoreError>;

    /// Remove a user, keeping the order of the rest
    fn delete(&self, id: i64) -> Result<User, StoreError>;

    /// Users whose name contains `query`, ignoring case
    fn search_by_name(&self, query: &str) -> Result<Vec<User>, StoreError>;

    fn summary(&self) -> Result<UserSummary, StoreError>;
}
