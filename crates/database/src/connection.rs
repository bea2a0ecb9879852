use crate::error::DbError;
use dotenvy::dotenv;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// This function reads the `DATABASE_URL` from the environment (loading a
/// `.env` file first if one exists) and returns a pool that can be shared
/// across the entire application.
pub async fn connect(max_connections: u32, acquire_timeout: Duration) -> Result<PgPool, DbError> {
    // A missing .env is fine as long as DATABASE_URL is already set.
    dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_e| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "Connected to the database.");
    Ok(pool)
}

/// Applies the embedded migrations so the `users` and `employees` tables exist.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations are up to date.");
    Ok(())
}
