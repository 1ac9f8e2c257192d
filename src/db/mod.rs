//! Database connection pool and migration utilities.

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

/// Create a bounded MySQL connection pool.
///
/// Connections are acquired per query and returned to the pool when the query
/// completes or fails. `timeout` bounds both connection establishment and the
/// wait for a free slot.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    timeout: Duration,
) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(timeout)
        .connect(database_url)
        .await
}

/// Create a pool without connecting; the first query opens the first connection.
pub fn create_lazy_pool(
    database_url: &str,
    max_connections: u32,
    timeout: Duration,
) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(timeout)
        .connect_lazy(database_url)
}

/// Apply the bundled schema migrations (creates the `cartoes` table).
pub async fn migrate(pool: &MySqlPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
