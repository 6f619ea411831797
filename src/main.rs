use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use users_api::config::CONFIG;
use users_api::infrastructure::storage::SharedStore;
use users_api::{SqliteUserStore, UserService, api};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&CONFIG.log_level))
        .init();
    info!(config = ?*CONFIG, "starting users api");

    // The store lives for the whole process and is handed to the service.
    let storage: SharedStore =
        Arc::new(SqliteUserStore::connect(&CONFIG.database_url, CONFIG.database_max_connections).await?);
    let service = Arc::new(UserService::new(storage));

    let app = api::app(service, CONFIG.request_timeout);

    // Start server
    let addr: SocketAddr = format!("{}:{}", CONFIG.host, CONFIG.port).parse()?;
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
