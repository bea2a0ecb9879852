use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username and password must both be provided")]
    MissingCredentials,

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Credential storage failed: {0}")]
    Storage(String),

    #[error("Lock poisoned during {0}")]
    LockPoisoned(&'static str),
}
