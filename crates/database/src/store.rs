use crate::error::DbError;
use async_trait::async_trait;
use core_types::{CoreError, Employee, EmployeeUpdate, MAX_PROMOTION_COUNT, NewEmployee};
use rust_decimal::Decimal;
use std::sync::Arc;

/// The employee repository.
///
/// Implementations validate payloads at this boundary, so anything returned
/// from `list` already satisfies every `Employee` invariant. `list` returns
/// employees ordered by id, which gives callers a stable snapshot order.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, DbError>;

    async fn get(&self, id: i64) -> Result<Employee, DbError>;

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DbError>;

    async fn update(&self, id: i64, update: EmployeeUpdate) -> Result<Employee, DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Replaces the salary and increments the promotion count.
    /// The new salary may not be lower than the current one.
    async fn promote(&self, id: i64, new_salary: Decimal) -> Result<Employee, DbError>;

    async fn count(&self) -> Result<u64, DbError>;
}

#[async_trait]
impl<T: EmployeeStore + ?Sized> EmployeeStore for Arc<T> {
    async fn list(&self) -> Result<Vec<Employee>, DbError> {
        (**self).list().await
    }

    async fn get(&self, id: i64) -> Result<Employee, DbError> {
        (**self).get(id).await
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DbError> {
        (**self).insert(employee).await
    }

    async fn update(&self, id: i64, update: EmployeeUpdate) -> Result<Employee, DbError> {
        (**self).update(id, update).await
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        (**self).delete(id).await
    }

    async fn promote(&self, id: i64, new_salary: Decimal) -> Result<Employee, DbError> {
        (**self).promote(id, new_salary).await
    }

    async fn count(&self) -> Result<u64, DbError> {
        (**self).count().await
    }
}

/// Shared promotion rule for every store.
///
/// Returns the promotion count the employee will have afterwards.
pub(crate) fn check_promotion(
    current_salary: Decimal,
    promotion_count: u32,
    new_salary: Decimal,
) -> Result<u32, DbError> {
    core_types::check_salary(new_salary)?;
    if new_salary < current_salary {
        return Err(CoreError::InvalidInput(
            "salary".to_string(),
            format!(
                "a promotion cannot lower the salary from {} to {}",
                current_salary, new_salary
            ),
        )
        .into());
    }
    promotion_count
        .checked_add(1)
        .filter(|count| *count <= MAX_PROMOTION_COUNT)
        .ok_or_else(|| {
            CoreError::InvalidInput(
                "promotion_count".to_string(),
                format!("cannot exceed {}", MAX_PROMOTION_COUNT),
            )
            .into()
        })
}
