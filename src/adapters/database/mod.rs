pub mod records;
pub mod sms_repo;
pub mod store;

pub use store::PgSmsStore;

use crate::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

/// Builds the connection pool without connecting.
///
/// Connections are opened on first use, so an unreachable database surfaces per request
/// rather than at startup.
///
/// # Errors
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn init_pool(url: &str, config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy(url)
}
