use utoipa::OpenApi;

use crate::{
    api::models::{ErrorResponse, StoreErrorResponse, ValidationErrorResponse},
    core::{
        errors::FieldError,
        models::{PublicUser, User, UserInput},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_users,
        super::handlers::create_user,
        super::handlers::update_user
    ),
    components(schemas(
        UserInput,
        User,
        PublicUser,
        FieldError,
        ErrorResponse,
        StoreErrorResponse,
        ValidationErrorResponse
    )),
    info(
        title = "Users API",
        description = "Create, update and list users",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
