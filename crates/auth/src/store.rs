use crate::error::AuthError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Persistence for username -> password hash pairs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored hash, or `None` if the user does not exist.
    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, AuthError>;

    /// Stores a new user. Fails with `AuthError::UsernameTaken` on a duplicate.
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<(), AuthError>;

    async fn user_count(&self) -> Result<u64, AuthError>;
}

#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, AuthError> {
        (**self).find_password_hash(username).await
    }

    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<(), AuthError> {
        (**self).insert_user(username, password_hash).await
    }

    async fn user_count(&self) -> Result<u64, AuthError> {
        (**self).user_count().await
    }
}

/// A process-local credential store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, AuthError> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::LockPoisoned("read"))?;
        Ok(users.get(username).cloned())
    }

    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<(), AuthError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?;
        if users.contains_key(username) {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }
        users.insert(username.to_string(), password_hash.to_string());
        Ok(())
    }

    async fn user_count(&self) -> Result<u64, AuthError> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::LockPoisoned("read"))?;
        Ok(users.len() as u64)
    }
}
