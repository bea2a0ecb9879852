//! # Workforce Auth
//!
//! Registration, password verification and login sessions for dashboard users.
//!
//! - `hashing`: salted HMAC-SHA256 password hashes.
//! - `CredentialStore`: where hashes live. The database crate provides the
//!   Postgres implementation; `InMemoryCredentialStore` backs tests.
//! - `AuthService`: the register/verify rules on top of a store.
//! - `SessionStore`: bearer tokens handed out on login.

pub mod error;
pub mod hashing;
pub mod service;
pub mod session;
pub mod store;

pub use error::AuthError;
pub use hashing::{hash_password, verify_password};
pub use service::AuthService;
pub use session::SessionStore;
pub use store::{CredentialStore, InMemoryCredentialStore};
