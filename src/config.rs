use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("database_max_connections", &self.database_max_connections)
            .field("request_timeout", &self.request_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn parsed_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl Config {
    /// Builds a config from `lookup`, falling back to defaults for missing or
    /// unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed_or(lookup("PORT"), 3000),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite::memory:".to_string()),
            database_max_connections: parsed_or(lookup("DATABASE_MAX_CONNECTIONS"), 5),
            request_timeout: Duration::from_secs(parsed_or(lookup("REQUEST_TIMEOUT_SECS"), 30)),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }
}

// Global static for the process entry point
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
