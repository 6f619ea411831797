use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::EMAIL_ALREADY_EXISTS;
use crate::core::errors::{FieldError, UsersError};
use crate::core::models::UserInput;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Store failure body, including the statement that failed.
#[derive(Serialize, ToSchema)]
pub struct StoreErrorResponse {
    pub error: String,
    pub sql: String,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

// Newtype wrapper for UsersError to implement IntoResponse
pub struct ApiError(pub UsersError);

impl From<UsersError> for ApiError {
    fn from(err: UsersError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self.0 {
            UsersError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ValidationErrorResponse { errors })).into_response()
            }
            UsersError::EmailAlreadyExists => (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: EMAIL_ALREADY_EXISTS.to_string(),
                }),
            )
                .into_response(),
            UsersError::UserNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("User {} not found", id),
                }),
            )
                .into_response(),
            UsersError::MalformedBody(msg) => (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: msg })).into_response(),
            UsersError::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StoreErrorResponse {
                    error: err.message,
                    sql: err.sql,
                }),
            )
                .into_response(),
        }
    }
}

/// User fields read from either a JSON or a urlencoded form body.
pub struct UserPayload(pub UserInput);

fn is_form_body(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

impl<S> FromRequest<S> for UserPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form_body(&req) {
            let Form(input) = Form::<UserInput>::from_request(req, state)
                .await
                .map_err(|rejection| UsersError::MalformedBody(rejection.body_text()))?;
            Ok(UserPayload(input))
        } else {
            let Json(input) = Json::<UserInput>::from_request(req, state)
                .await
                .map_err(|rejection| UsersError::MalformedBody(rejection.body_text()))?;
            Ok(UserPayload(input))
        }
    }
}
