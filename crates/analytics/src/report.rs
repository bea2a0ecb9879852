use core_types::Employee;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics derived from a set of employees.
///
/// This struct is recomputed from scratch for every query and is never
/// persisted. Every average is zero when the set is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_count: usize,
    pub average_salary: Decimal,
    pub average_performance: Decimal,
    pub total_promotions: u64,
    /// Keyed by department name, restricted to departments present in the set.
    pub per_department: BTreeMap<String, DepartmentStats>,
}

impl AggregateResult {
    /// Creates a new, zeroed-out result. This is the aggregate of an empty set.
    pub fn new() -> Self {
        Self {
            total_count: 0,
            average_salary: Decimal::ZERO,
            average_performance: Decimal::ZERO,
            total_promotions: 0,
            per_department: BTreeMap::new(),
        }
    }
}

impl Default for AggregateResult {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentStats {
    pub count: usize,
    pub average_salary: Decimal,
}

/// The output of `AnalyticsEngine::apply`: the matching employees, in their
/// original order, and the statistics computed over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub filtered: Vec<Employee>,
    pub stats: AggregateResult,
}

/// One bar of the salary distribution chart.
///
/// Buckets are half-open `[lower, upper)` except the last, which also
/// includes `upper` so the highest salary is always counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBucket {
    pub lower: Decimal,
    pub upper: Decimal,
    pub count: usize,
}
