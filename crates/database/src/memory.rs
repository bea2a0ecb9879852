use crate::error::DbError;
use crate::store::{EmployeeStore, check_promotion};
use async_trait::async_trait;
use core_types::{Employee, EmployeeUpdate, NewEmployee};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Employee>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

/// A process-local employee repository.
///
/// Backs the test suites and the `--in-memory` server mode. Ids are handed
/// out from a counter and never reused, matching the database sequence.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryRepository {
    async fn list(&self) -> Result<Vec<Employee>, DbError> {
        let table = self
            .table
            .read()
            .map_err(|_| DbError::LockPoisoned("read"))?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Employee, DbError> {
        let table = self
            .table
            .read()
            .map_err(|_| DbError::LockPoisoned("read"))?;
        table.rows.get(&id).cloned().ok_or(DbError::NotFound(id))
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DbError> {
        let employee = employee.validate()?;
        let mut table = self
            .table
            .write()
            .map_err(|_| DbError::LockPoisoned("write"))?;

        let id = table.next_id;
        table.next_id += 1;
        let employee = employee.into_employee(id);
        table.rows.insert(id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, id: i64, update: EmployeeUpdate) -> Result<Employee, DbError> {
        let update = update.validate()?;
        let mut table = self
            .table
            .write()
            .map_err(|_| DbError::LockPoisoned("write"))?;

        let employee = table.rows.get_mut(&id).ok_or(DbError::NotFound(id))?;
        update.apply_to(employee);
        Ok(employee.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| DbError::LockPoisoned("write"))?;
        table.rows.remove(&id).map(|_| ()).ok_or(DbError::NotFound(id))
    }

    async fn promote(&self, id: i64, new_salary: Decimal) -> Result<Employee, DbError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| DbError::LockPoisoned("write"))?;

        let employee = table.rows.get_mut(&id).ok_or(DbError::NotFound(id))?;
        let promotion_count =
            check_promotion(employee.salary, employee.promotion_count, new_salary)?;
        employee.salary = new_salary;
        employee.promotion_count = promotion_count;
        Ok(employee.clone())
    }

    async fn count(&self) -> Result<u64, DbError> {
        let table = self
            .table
            .read()
            .map_err(|_| DbError::LockPoisoned("read"))?;
        Ok(table.rows.len() as u64)
    }
}
