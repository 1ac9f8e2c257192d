use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_connect_timeout_secs: u64,
    pub database_query_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            database_connect_timeout_secs: parse_or("DATABASE_CONNECT_TIMEOUT_SECS", 10),
            database_query_timeout_secs: parse_or("DATABASE_QUERY_TIMEOUT_SECS", 30),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("BACKEND_PORT", 3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        })
    }

    /// Upper bound for establishing a store connection or waiting on the pool.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database_connect_timeout_secs.max(1))
    }

    /// Upper bound for one request's store work, pool wait included.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.database_query_timeout_secs.max(1))
    }
}

/// Read a numeric variable, falling back to `default` when unset or unparseable.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
