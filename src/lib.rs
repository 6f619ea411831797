pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::UsersError;
pub use crate::core::services::UserService;
pub use infrastructure::storage::{in_memory::InMemoryUserStore, sqlite::SqliteUserStore};

#[cfg(test)]
mod tests; // Include integration tests
