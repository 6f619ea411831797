pub mod handlers;
pub mod models;
pub mod openapi;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::AppService;
use openapi::ApiDoc;

/// Full application router: the `/api` routes, a health check, API docs and
/// the HTTP middleware stack.
pub fn app(service: Arc<AppService>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/api", handlers::api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}
