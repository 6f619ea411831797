mod user_tests;

use crate::constants::{SQL_INSERT_USER, SQL_SELECT_USER_BY_ID, SQL_SELECT_USERS, SQL_UPDATE_USER};
use crate::core::models::{User, UserInput};
use crate::core::services::UserService;
use crate::infrastructure::storage::in_memory::InMemoryUserStore;
use crate::infrastructure::storage::{StoreError, StoreErrorKind, UserStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn create_test_service() -> UserService<InMemoryUserStore> {
    UserService::new(InMemoryUserStore::new())
}

pub fn user_input(email: &str, password: &str, name: &str) -> UserInput {
    UserInput {
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    }
}

/// Which store call a [`FailingStore`] breaks on.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    List,
    Write,
    Refetch,
    /// Re-fetch succeeds but finds no row.
    MissingRow,
}

/// In-memory store that fails one kind of call with a generic store error
/// and counts the writes it was asked to perform.
pub struct FailingStore {
    inner: InMemoryUserStore,
    fail_on: FailOn,
    writes: AtomicUsize,
}

impl FailingStore {
    pub fn new(fail_on: FailOn) -> Self {
        FailingStore {
            inner: InMemoryUserStore::new(),
            fail_on,
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self, call: FailOn, sql: &str) -> Result<(), StoreError> {
        if self.fail_on == call {
            return Err(StoreError::new(StoreErrorKind::Other, "database is locked", sql));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.check(FailOn::List, SQL_SELECT_USERS)?;
        self.inner.list_users().await
    }

    async fn insert_user(&self, user: &UserInput) -> Result<i64, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(FailOn::Write, SQL_INSERT_USER)?;
        self.inner.insert_user(user).await
    }

    async fn update_user(&self, id: i64, user: &UserInput) -> Result<u64, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(FailOn::Write, SQL_UPDATE_USER)?;
        self.inner.update_user(id, user).await
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.check(FailOn::Refetch, SQL_SELECT_USER_BY_ID)?;
        if self.fail_on == FailOn::MissingRow {
            return Ok(None);
        }
        self.inner.find_user(id).await
    }
}
