//! # Workforce Database Crate
//!
//! This crate owns every employee record and every stored credential.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all storage-specific logic behind the
//!   `EmployeeStore` trait (and `auth::CredentialStore`), hiding the SQL from
//!   the rest of the application.
//! - **Validation at the Boundary:** Payloads are validated on the way in, so
//!   the analytics engine can trust every snapshot it is handed.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and the
//!   Postgres repository uses a connection pool (`PgPool`).
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: set up the Postgres pool and schema.
//! - `EmployeeStore`: the repository contract.
//! - `DbRepository`: Postgres implementation of `EmployeeStore` and `CredentialStore`.
//! - `InMemoryRepository`: process-local implementation of `EmployeeStore`.
//! - `seed_sample_employees`: demo data for an empty store.
//! - `DbError`: the specific error types that can be returned from this crate.

pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod seed;
pub mod store;

pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::InMemoryRepository;
pub use repository::DbRepository;
pub use seed::seed_sample_employees;
pub use store::EmployeeStore;
