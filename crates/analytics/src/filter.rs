use core_types::Employee;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The optional predicates narrowing an employee query.
///
/// Every field is optional and an absent field places no constraint on the
/// result. Blank strings count as absent. All present predicates are combined
/// with a logical AND.
///
/// Substring needles (`name`, `search`) are trimmed before matching. Equality
/// needles (`role`, `department`, `departments`) are compared exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Case-insensitive substring of the employee's name.
    pub name: Option<String>,
    /// Case-insensitive substring of either the name or the role.
    pub search: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    /// Any-of membership. An empty list places no constraint.
    pub departments: Vec<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub performance_min: Option<u8>,
    pub performance_max: Option<u8>,
    pub joining_year: Option<i32>,
    pub joining_year_min: Option<i32>,
    pub joining_year_max: Option<i32>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// A spec is unsatisfiable when any of its ranges has `min > max`.
    /// Such a spec matches nothing.
    pub fn is_satisfiable(&self) -> bool {
        ordered(self.salary_min, self.salary_max)
            && ordered(self.performance_min, self.performance_max)
            && ordered(self.joining_year_min, self.joining_year_max)
    }

    /// Whether a single employee passes every present predicate.
    pub fn matches(&self, employee: &Employee) -> bool {
        if let Some(needle) = present(&self.name) {
            if !contains_ignore_case(&employee.name, needle) {
                return false;
            }
        }
        if let Some(needle) = present(&self.search) {
            if !contains_ignore_case(&employee.name, needle)
                && !contains_ignore_case(&employee.role, needle)
            {
                return false;
            }
        }
        if let Some(role) = non_blank(&self.role) {
            if employee.role != role {
                return false;
            }
        }
        if let Some(department) = non_blank(&self.department) {
            if employee.department != department {
                return false;
            }
        }
        if !self.departments.is_empty()
            && !self.departments.iter().any(|d| *d == employee.department)
        {
            return false;
        }
        if let Some(year) = self.joining_year {
            if employee.joining_year() != year {
                return false;
            }
        }

        within(employee.salary, self.salary_min, self.salary_max)
            && within(
                employee.performance_score,
                self.performance_min,
                self.performance_max,
            )
            && within(
                employee.joining_year(),
                self.joining_year_min,
                self.joining_year_max,
            )
    }
}

/// Treats `None`, `""` and whitespace-only strings alike.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Like `present`, but keeps surrounding whitespace for exact comparisons.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn ordered<T: PartialOrd>(min: Option<T>, max: Option<T>) -> bool {
    match (min, max) {
        (Some(min), Some(max)) => min <= max,
        _ => true,
    }
}

/// Inclusive on both bounds; a missing bound leaves that side open.
fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}
