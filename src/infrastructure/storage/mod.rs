use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::models::{User, UserInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// A unique constraint rejected the write
    DuplicateKey,
    Other,
}

/// Failure reported by a [`UserStore`], carrying the statement that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
    pub sql: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>, sql: impl Into<String>) -> Self {
        StoreError {
            kind,
            message: message.into(),
            sql: sql.into(),
        }
    }

    pub fn is_duplicate_key(&self) -> bool {
        self.kind == StoreErrorKind::DuplicateKey
    }
}

/// Persistence for user rows. Implementations own id assignment and email
/// uniqueness.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All rows in ascending id order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    /// Inserts a row and returns the id the store assigned to it.
    async fn insert_user(&self, user: &UserInput) -> Result<i64, StoreError>;
    /// Overwrites every mutable field of row `id`. Returns the number of rows
    /// affected, which is zero when no such row exists.
    async fn update_user(&self, id: i64, user: &UserInput) -> Result<u64, StoreError>;
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;
}

/// Store shared behind a trait object, as handed to the HTTP layer.
pub type SharedStore = Arc<dyn UserStore>;

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        (**self).list_users().await
    }

    async fn insert_user(&self, user: &UserInput) -> Result<i64, StoreError> {
        (**self).insert_user(user).await
    }

    async fn update_user(&self, id: i64, user: &UserInput) -> Result<u64, StoreError> {
        (**self).update_user(id, user).await
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        (**self).find_user(id).await
    }
}

pub mod in_memory;
pub mod sqlite;
