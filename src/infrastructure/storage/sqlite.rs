use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::constants::{
    SQL_CREATE_USERS_TABLE, SQL_INSERT_USER, SQL_SELECT_USER_BY_ID, SQL_SELECT_USERS, SQL_UPDATE_USER,
};
use crate::core::models::{User, UserInput};
use crate::infrastructure::storage::{StoreError, StoreErrorKind, UserStore};

fn store_error(err: sqlx::Error, sql: &str) -> StoreError {
    let kind = match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreErrorKind::DuplicateKey,
        _ => StoreErrorKind::Other,
    };
    StoreError::new(kind, err.to_string(), sql)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// `user` table access through a sqlx SQLite pool.
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Opens a pool on `url` and creates the `user` table if it is missing.
    ///
    /// An in-memory database lives only as long as its connection, so such
    /// URLs get a single connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };
        let pool = options
            .connect(url)
            .await
            .map_err(|e| store_error(e, "-- connect"))?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(SQL_CREATE_USERS_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| store_error(e, SQL_CREATE_USERS_TABLE))?;
        debug!("user table ready");
        Ok(SqliteUserStore { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, User>(SQL_SELECT_USERS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(e, SQL_SELECT_USERS))
    }

    async fn insert_user(&self, user: &UserInput) -> Result<i64, StoreError> {
        let result = sqlx::query(SQL_INSERT_USER)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.name)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, SQL_INSERT_USER))?;
        Ok(result.last_insert_rowid())
    }

    async fn update_user(&self, id: i64, user: &UserInput) -> Result<u64, StoreError> {
        let result = sqlx::query(SQL_UPDATE_USER)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, SQL_UPDATE_USER))?;
        Ok(result.rows_affected())
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(SQL_SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, SQL_SELECT_USER_BY_ID))
    }
}
