use crate::{
    api::models::*,
    core::{
        models::{PublicUser, User, UserInput},
        services::UserService,
    },
    infrastructure::storage::SharedStore,
};
use axum::{
    Json, Router,
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::IntoResponse,
    routing::{get, put},
};

use std::sync::Arc;

pub type AppService = UserService<SharedStore>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user))
        .with_state(service)
}

fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string())
}

/// Absolute URL of user `id` inside the collection at `collection_path`.
pub fn resource_location(host: &str, collection_path: &str, id: i64) -> String {
    format!("http://{}{}/{}", host, collection_path.trim_end_matches('/'), id)
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All stored users", body = [User]),
        (status = 500, description = "Store error", body = StoreErrorResponse)
    )
)]
pub async fn list_users(
    State(service): State<Arc<AppService>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body(content = UserInput, content_type = "application/json"),
    responses(
        (status = 201, description = "User created", body = PublicUser,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ValidationErrorResponse),
        (status = 500, description = "Store error", body = StoreErrorResponse)
    )
)]
pub async fn create_user(
    State(service): State<Arc<AppService>>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    UserPayload(input): UserPayload,
) -> Result<impl IntoResponse, ApiError> {
    let user = service.create_user(input).await?;
    let location = resource_location(&request_host(&headers, &uri), uri.path(), user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "ID of the user to update")
    ),
    request_body(content = UserInput, content_type = "application/json"),
    responses(
        (status = 200, description = "User updated", body = PublicUser,
            headers(("Location" = String, description = "URL of the user"))),
        (status = 400, description = "Malformed body or id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ValidationErrorResponse),
        (status = 500, description = "Store error", body = StoreErrorResponse)
    )
)]
pub async fn update_user(
    State(service): State<Arc<AppService>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    UserPayload(input): UserPayload,
) -> Result<impl IntoResponse, ApiError> {
    let user = service.update_user(id, input).await?;
    // The request path already names the user; strip the id so the location
    // is built the same way as on create.
    let collection = uri.path().rsplit_once('/').map_or("", |(parent, _)| parent);
    let location = resource_location(&request_host(&headers, &uri), collection, user.id);
    Ok((StatusCode::OK, [(header::LOCATION, location)], Json(user)))
}
