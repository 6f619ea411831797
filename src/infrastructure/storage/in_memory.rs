use crate::constants::{SQL_INSERT_USER, SQL_UPDATE_USER};
use crate::core::models::{User, UserInput};
use crate::infrastructure::storage::{StoreError, StoreErrorKind, UserStore};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    emails: HashMap<String, i64>, // email -> user id
    next_id: i64,
}

/// Map-backed store with the same id assignment and email uniqueness rules
/// as the SQL table.
pub struct InMemoryUserStore {
    tables: Mutex<Tables>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        InMemoryUserStore {
            tables: Mutex::new(Tables {
                next_id: 1,
                ..Tables::default()
            }),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate_email(email: &str, sql: &str) -> StoreError {
    StoreError::new(
        StoreErrorKind::DuplicateKey,
        format!("Duplicate entry '{}' for key 'email'", email),
        sql,
    )
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.lock().await.users.values().cloned().collect())
    }

    async fn insert_user(&self, user: &UserInput) -> Result<i64, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.emails.contains_key(&user.email) {
            return Err(duplicate_email(&user.email, SQL_INSERT_USER));
        }
        let id = tables.next_id;
        tables.next_id += 1;
        tables.emails.insert(user.email.clone(), id);
        tables.users.insert(id, User::from_input(id, user));
        Ok(id)
    }

    async fn update_user(&self, id: i64, user: &UserInput) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let Some(previous_email) = tables.users.get(&id).map(|u| u.email.clone()) else {
            return Ok(0);
        };
        if tables.emails.get(&user.email).is_some_and(|&owner| owner != id) {
            return Err(duplicate_email(&user.email, SQL_UPDATE_USER));
        }
        tables.emails.remove(&previous_email);
        tables.emails.insert(user.email.clone(), id);
        tables.users.insert(id, User::from_input(id, user));
        Ok(1)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }
}
