//! Demo data for a fresh installation.

use crate::error::DbError;
use crate::store::EmployeeStore;
use chrono::NaiveDate;
use core_types::{CoreError, EmployeeUpdate, Gender, NewEmployee};
use rust_decimal::Decimal;

// name, age, gender, role, department, salary, date of joining, score, promotions
const SAMPLE_EMPLOYEES: [(&str, i32, Gender, &str, &str, i64, &str, u8, u32); 5] = [
    ("Aarav Sharma", 28, Gender::M, "Developer", "IT", 55000, "2021-06-15", 4, 1),
    ("Meera Patel", 32, Gender::F, "HR Executive", "HR", 48000, "2019-03-20", 3, 0),
    ("Rohan Singh", 40, Gender::M, "Finance Manager", "Finance", 70000, "2017-11-05", 5, 2),
    ("Priya Mehta", 25, Gender::F, "Marketing Specialist", "Marketing", 45000, "2022-01-10", 3, 0),
    ("Arjun Desai", 30, Gender::M, "Ops Lead", "Operations", 52000, "2020-09-01", 4, 1),
];

/// Inserts the sample employees, but only into an empty store.
///
/// Returns how many employees were inserted.
pub async fn seed_sample_employees<S>(store: &S) -> Result<usize, DbError>
where
    S: EmployeeStore + ?Sized,
{
    if store.count().await? > 0 {
        tracing::debug!("Employee table already populated; skipping sample data.");
        return Ok(0);
    }

    for (name, age, gender, role, department, salary, joined, score, promotions) in SAMPLE_EMPLOYEES {
        let date_of_joining = joined.parse::<NaiveDate>().map_err(|e| {
            CoreError::InvalidInput("date_of_joining".to_string(), e.to_string())
        })?;

        let employee = store
            .insert(NewEmployee {
                name: name.to_string(),
                age,
                gender,
                role: role.to_string(),
                department: department.to_string(),
                salary: Decimal::from(salary),
                date_of_joining,
                performance_score: score,
            })
            .await?;

        if promotions > 0 {
            let update = EmployeeUpdate {
                promotion_count: promotions,
                ..EmployeeUpdate::from(&employee)
            };
            store.update(employee.id, update).await?;
        }
    }

    tracing::info!(count = SAMPLE_EMPLOYEES.len(), "Seeded sample employees.");
    Ok(SAMPLE_EMPLOYEES.len())
}
