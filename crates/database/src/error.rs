use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Rejected employee data: {0}")]
    Validation(#[from] CoreError),

    #[error("Employee {0} was not found.")]
    NotFound(i64),

    #[error("Stored row could not be read: {0}")]
    CorruptRow(String),

    #[error("Lock poisoned during {0}")]
    LockPoisoned(&'static str),
}
