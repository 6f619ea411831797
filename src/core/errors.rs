use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::infrastructure::storage::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug)]
pub enum UsersError {
    /// One or more input fields failed validation
    #[error("Invalid input: {} field(s) rejected", .0.len())]
    Validation(Vec<FieldError>),

    /// The store rejected a write because the email is taken
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("User {0} not found")]
    UserNotFound(i64),

    /// Request body could not be decoded
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for UsersError {
    fn from(err: StoreError) -> Self {
        if err.is_duplicate_key() {
            UsersError::EmailAlreadyExists
        } else {
            UsersError::Store(err)
        }
    }
}
