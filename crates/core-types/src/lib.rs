//! # Workforce Core Types
//!
//! The foundational data structures shared by every other crate: the
//! `Employee` record, the payloads used to create and change one, and the
//! validation rules that guard the repository boundary.
//!
//! This crate has no knowledge of storage, HTTP or analytics.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Gender;
pub use error::CoreError;
pub use structs::{
    AGE_RANGE, DEFAULT_PERFORMANCE_SCORE, Employee, EmployeeUpdate, MAX_PROMOTION_COUNT,
    MAX_SALARY, NewEmployee, PERFORMANCE_SCORE_RANGE, SALARY_SCALE, check_salary,
};
