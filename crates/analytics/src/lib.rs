//! # Workforce Analytics Engine
//!
//! This crate answers the one question every dashboard page asks: "which
//! employees match these filters, and what do they look like in aggregate?"
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of storage or HTTP. It depends
//!   only on `core-types`.
//! - **Stateless Calculation:** The `AnalyticsEngine` takes an immutable snapshot
//!   of employees and a `FilterSpec` and produces a fresh `QueryResult` on every
//!   call. Nothing is cached and no input is mutated, so it is safe to call from
//!   any number of request handlers at once.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: filtering, aggregation and the salary distribution.
//! - `FilterSpec`: the optional predicates narrowing a query.
//! - `AggregateResult` / `DepartmentStats` / `SalaryBucket`: derived statistics.
//! - `export`: CSV serialization of a (filtered) employee sequence.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod report;

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use filter::FilterSpec;
pub use report::{AggregateResult, DepartmentStats, QueryResult, SalaryBucket};
