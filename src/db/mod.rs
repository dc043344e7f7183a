//! Database connection pool and migration utilities.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Versioned schema changes embedded from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply all pending migrations. Must complete before the listener binds.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let pending = MIGRATOR.iter().count();
    tracing::info!(migrations = pending, "Applying database migrations");
    MIGRATOR.run(pool).await
}
