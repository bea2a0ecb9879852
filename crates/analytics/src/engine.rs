use crate::error::AnalyticsError;
use crate::filter::FilterSpec;
use crate::report::{AggregateResult, DepartmentStats, QueryResult, SalaryBucket};
use core_types::Employee;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

/// A stateless calculator that filters employee snapshots and derives
/// dashboard statistics from them.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for every employee query.
    ///
    /// # Arguments
    ///
    /// * `employees` - An immutable snapshot of the repository.
    /// * `spec` - The predicates to apply. Absent predicates match everything.
    ///
    /// # Returns
    ///
    /// The matching employees in snapshot order, plus aggregates over them.
    /// This never fails: an unsatisfiable spec (e.g. `salary_min > salary_max`)
    /// simply produces an empty result with zeroed aggregates.
    pub fn apply(&self, employees: &[Employee], spec: &FilterSpec) -> QueryResult {
        if !spec.is_satisfiable() {
            tracing::debug!(?spec, "Filter has an inverted range; returning an empty result.");
            return QueryResult {
                filtered: Vec::new(),
                stats: AggregateResult::new(),
            };
        }

        let filtered: Vec<Employee> = employees
            .iter()
            .filter(|e| spec.matches(e))
            .cloned()
            .collect();
        let stats = self.summarize(&filtered);

        tracing::debug!(
            input = employees.len(),
            matched = filtered.len(),
            "Applied employee filter."
        );

        QueryResult { filtered, stats }
    }

    /// Computes the aggregate statistics of a set of employees in a single pass.
    ///
    /// Sums saturate at `Decimal::MAX` instead of overflowing, so this is total
    /// over any snapshot, including records that never passed validation.
    pub fn summarize(&self, employees: &[Employee]) -> AggregateResult {
        let mut report = AggregateResult::new();
        if employees.is_empty() {
            return report;
        }

        let mut salary_sum = Decimal::ZERO;
        let mut performance_sum = Decimal::ZERO;
        // department -> (count, salary sum)
        let mut departments: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();

        for employee in employees {
            salary_sum = salary_sum.saturating_add(employee.salary);
            performance_sum = performance_sum.saturating_add(Decimal::from(employee.performance_score));
            report.total_promotions = report
                .total_promotions
                .saturating_add(u64::from(employee.promotion_count));

            let entry = departments
                .entry(employee.department.as_str())
                .or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(employee.salary);
        }

        report.total_count = employees.len();
        report.average_salary = mean(salary_sum, report.total_count);
        report.average_performance = mean(performance_sum, report.total_count);
        report.per_department = departments
            .into_iter()
            .map(|(name, (count, salary_sum))| {
                (
                    name.to_string(),
                    DepartmentStats {
                        count,
                        average_salary: mean(salary_sum, count),
                    },
                )
            })
            .collect();

        report
    }

    /// Splits the salary range of `employees` into `bins` equal-width buckets.
    ///
    /// An empty input yields no buckets. When every salary is identical, or the
    /// range is too narrow to split into `bins` representable widths, a single
    /// bucket holds everyone.
    pub fn salary_distribution(
        &self,
        employees: &[Employee],
        bins: usize,
    ) -> Result<Vec<SalaryBucket>, AnalyticsError> {
        if bins == 0 {
            return Err(AnalyticsError::InvalidBinCount);
        }

        let Some(min) = employees.iter().map(|e| e.salary).min() else {
            return Ok(Vec::new());
        };
        let max = employees.iter().map(|e| e.salary).max().unwrap_or(min);

        let width = (max - min) / Decimal::from(bins);
        if width.is_zero() {
            return Ok(vec![SalaryBucket {
                lower: min,
                upper: max,
                count: employees.len(),
            }]);
        }

        let mut buckets: Vec<SalaryBucket> = (0..bins)
            .map(|i| SalaryBucket {
                lower: min + width * Decimal::from(i),
                upper: if i + 1 == bins { max } else { min + width * Decimal::from(i + 1) },
                count: 0,
            })
            .collect();

        for employee in employees {
            let index = (employee.salary - min)
                .checked_div(width)
                .and_then(|offset| offset.floor().to_usize())
                .unwrap_or(bins - 1)
                .min(bins - 1);
            buckets[index].count += 1;
        }

        Ok(buckets)
    }
}

fn mean(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    sum / Decimal::from(count)
}
