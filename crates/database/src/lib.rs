//! `PostgreSQL` persistence for users, sessions and check-ups.

use std::sync::OnceLock;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::warn;

mod check_up;
mod session;
mod user;

pub use check_up::*;
pub use session::*;
pub use user::*;

static POOL: OnceLock<PgPool> = OnceLock::new();

/// Creates a connection pool to the `PostgreSQL` database.
///
/// # Errors
///
/// Returns an error if the connection to the database fails.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Creates the global pool used by the repository functions.
///
/// Calling it again keeps the first pool.
///
/// # Errors
///
/// Returns an error if the connection to the database fails.
pub async fn initialize_pool(database_url: &str, max_connections: u32) -> Result<(), sqlx::Error> {
    let pool = create_pool(database_url, max_connections).await?;
    if POOL.set(pool).is_err() {
        warn!("Database pool already initialized, keeping the existing one");
    }
    Ok(())
}

/// Returns the global pool.
///
/// # Errors
///
/// Returns an error if [`initialize_pool`] has not run yet.
pub fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get()
        .ok_or_else(|| sqlx::Error::Configuration("database pool not initialized".into()))
}

/// Runs all pending migrations.
///
/// # Errors
///
/// Returns an error if running migrations fails.
pub async fn run_migrations() -> Result<(), sqlx::migrate::MigrateError> {
    let pool = get_pool()?;
    sqlx::migrate!("./migrations").run(pool).await
}
