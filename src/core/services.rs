use crate::constants::SQL_SELECT_USER_BY_ID;
use crate::core::errors::UsersError;
use crate::core::models::{PublicUser, User, UserInput};
use crate::core::validation::validate_user_input;
use crate::infrastructure::storage::{StoreError, StoreErrorKind, UserStore};
use tracing::{error, info, warn};

pub struct UserService<S: UserStore> {
    storage: S,
}

impl<S: UserStore> UserService<S> {
    pub fn new(storage: S) -> Self {
        UserService { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn validate(&self, input: &UserInput) -> Result<(), UsersError> {
        validate_user_input(input).map_err(|errors| {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            warn!(?fields, "user input rejected");
            UsersError::Validation(errors)
        })
    }

    /// Re-reads row `id` after a write.
    async fn refetch(&self, id: i64) -> Result<Option<PublicUser>, UsersError> {
        let user = self.storage.find_user(id).await.map_err(|e| {
            error!(id, error = %e, sql = %e.sql, "re-fetch after write failed");
            UsersError::from(e)
        })?;
        Ok(user.map(PublicUser::from))
    }

    /// Every stored user, passwords included.
    pub async fn list_users(&self) -> Result<Vec<User>, UsersError> {
        self.storage.list_users().await.map_err(|e| {
            error!(error = %e, sql = %e.sql, "listing users failed");
            UsersError::from(e)
        })
    }

    pub async fn create_user(&self, input: UserInput) -> Result<PublicUser, UsersError> {
        self.validate(&input)?;

        let id = self.storage.insert_user(&input).await.map_err(|e| {
            if e.is_duplicate_key() {
                warn!(email = %input.email, "email already registered");
            } else {
                error!(error = %e, sql = %e.sql, "inserting user failed");
            }
            UsersError::from(e)
        })?;
        info!(id, "user created");

        // A row the store just assigned an id to must be readable.
        self.refetch(id).await?.ok_or_else(|| {
            error!(id, "inserted user missing on re-fetch");
            UsersError::Store(StoreError::new(
                StoreErrorKind::Other,
                format!("User {} missing after insert", id),
                SQL_SELECT_USER_BY_ID,
            ))
        })
    }

    pub async fn update_user(&self, id: i64, input: UserInput) -> Result<PublicUser, UsersError> {
        self.validate(&input)?;

        let affected = self.storage.update_user(id, &input).await.map_err(|e| {
            if e.is_duplicate_key() {
                warn!(id, email = %input.email, "email already registered");
            } else {
                error!(id, error = %e, sql = %e.sql, "updating user failed");
            }
            UsersError::from(e)
        })?;
        if affected == 0 {
            warn!(id, "update matched no user");
        } else {
            info!(id, "user updated");
        }

        self.refetch(id).await?.ok_or(UsersError::UserNotFound(id))
    }
}
