use crate::error::AuthError;
use crate::hashing::{hash_password, verify_password};
use crate::store::CredentialStore;

/// Registration and login rules on top of a `CredentialStore`.
#[derive(Debug, Clone)]
pub struct AuthService<S> {
    store: S,
}

impl<S: CredentialStore> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new user.
    ///
    /// Both values are trimmed first and must not be blank afterwards.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let (username, password) = (username.trim(), password.trim());
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        self.store
            .insert_user(username, &hash_password(password))
            .await?;
        tracing::info!(%username, "Registered new user.");
        Ok(())
    }

    /// Returns whether the password matches the stored hash.
    /// An unknown user is simply `false`.
    ///
    /// Both values are trimmed the same way `register` trims them.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let (username, password) = (username.trim(), password.trim());
        let verified = match self.store.find_password_hash(username).await? {
            Some(stored) => verify_password(password, &stored),
            None => false,
        };
        if !verified {
            tracing::warn!(%username, "Rejected login attempt.");
        }
        Ok(verified)
    }

    /// Creates the default administrator, but only while no user exists at all.
    ///
    /// Returns `true` if the account was created.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, AuthError> {
        if self.store.user_count().await? > 0 {
            return Ok(false);
        }
        self.register(username, password).await?;
        tracing::warn!(%username, "Created default admin account; change its password.");
        Ok(true)
    }
}
