use crate::DbError;
use crate::store::{EmployeeStore, check_promotion};
use async_trait::async_trait;
use auth::{AuthError, CredentialStore};
use chrono::NaiveDate;
use core_types::{CoreError, Employee, EmployeeUpdate, NewEmployee};
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::postgres::PgPool;

const EMPLOYEE_COLUMNS: &str = "id, name, age, gender, role, department, salary, \
     date_of_joining, performance_score, promotion_count";

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Database-specific employee struct that matches the employees table schema.
#[derive(Debug, Clone, FromRow)]
pub struct DbEmployee {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub role: String,
    pub department: String,
    pub salary: Decimal,
    pub date_of_joining: NaiveDate,
    pub performance_score: i16,
    pub promotion_count: i32,
}

impl TryFrom<DbEmployee> for Employee {
    type Error = DbError;

    fn try_from(row: DbEmployee) -> Result<Self, Self::Error> {
        let corrupt = |field: &str| DbError::CorruptRow(format!("employee {}: bad {}", row.id, field));
        Ok(Employee {
            id: row.id,
            gender: row.gender.parse().map_err(|_| corrupt("gender"))?,
            performance_score: u8::try_from(row.performance_score)
                .map_err(|_| corrupt("performance_score"))?,
            promotion_count: u32::try_from(row.promotion_count)
                .map_err(|_| corrupt("promotion_count"))?,
            name: row.name,
            age: row.age,
            role: row.role,
            department: row.department,
            salary: row.salary,
            date_of_joining: row.date_of_joining,
        })
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for DbRepository {
    async fn list(&self) -> Result<Vec<Employee>, DbError> {
        let rows = sqlx::query_as::<_, DbEmployee>(&format!(
            "SELECT {} FROM employees ORDER BY id ASC",
            EMPLOYEE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn get(&self, id: i64) -> Result<Employee, DbError> {
        let row = sqlx::query_as::<_, DbEmployee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(id))?;

        row.try_into()
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, DbError> {
        let employee = employee.validate()?;

        let row = sqlx::query_as::<_, DbEmployee>(&format!(
            r#"
            INSERT INTO employees
                (name, age, gender, role, department, salary, date_of_joining, performance_score, promotion_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0)
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(&employee.name)
        .bind(employee.age)
        .bind(employee.gender.as_str())
        .bind(&employee.role)
        .bind(&employee.department)
        .bind(employee.salary)
        .bind(employee.date_of_joining)
        .bind(i16::from(employee.performance_score))
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(id = row.id, name = %row.name, "Inserted employee.");
        row.try_into()
    }

    async fn update(&self, id: i64, update: EmployeeUpdate) -> Result<Employee, DbError> {
        let update = update.validate()?;
        let promotion_count = i32::try_from(update.promotion_count).map_err(|_| {
            CoreError::InvalidInput("promotion_count".to_string(), "is too large".to_string())
        })?;

        let row = sqlx::query_as::<_, DbEmployee>(&format!(
            r#"
            UPDATE employees SET
                name = $1, age = $2, gender = $3, role = $4, department = $5, salary = $6,
                date_of_joining = $7, performance_score = $8, promotion_count = $9
            WHERE id = $10
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(&update.name)
        .bind(update.age)
        .bind(update.gender.as_str())
        .bind(&update.role)
        .bind(&update.department)
        .bind(update.salary)
        .bind(update.date_of_joining)
        .bind(i16::from(update.performance_score))
        .bind(promotion_count)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(id))?;

        tracing::info!(id, "Updated employee.");
        row.try_into()
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id));
        }
        tracing::info!(id, "Deleted employee.");
        Ok(())
    }

    /// Reads and rewrites the salary within a single transaction, so two
    /// concurrent promotions cannot both pass the "no pay cut" check.
    async fn promote(&self, id: i64, new_salary: Decimal) -> Result<Employee, DbError> {
        let mut tx = self.pool.begin().await?;

        let (current, promotions) = sqlx::query_as::<_, (Decimal, i32)>(
            "SELECT salary, promotion_count FROM employees WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound(id))?;
        let promotions = u32::try_from(promotions)
            .map_err(|_| DbError::CorruptRow(format!("employee {}: promotion_count", id)))?;
        let promotion_count = check_promotion(current, promotions, new_salary)?;
        let promotion_count = i32::try_from(promotion_count).map_err(|_| {
            CoreError::InvalidInput("promotion_count".to_string(), "is too large".to_string())
        })?;

        let row = sqlx::query_as::<_, DbEmployee>(&format!(
            r#"
            UPDATE employees SET salary = $1, promotion_count = $2
            WHERE id = $3
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(new_salary)
        .bind(promotion_count)
        .bind(id)
        .fetch_one(&mut *tx) // Note: must use the transaction object `tx` here
        .await?;

        tx.commit().await?;
        tracing::info!(id, %current, %new_salary, "Promoted employee.");
        row.try_into()
    }

    async fn count(&self) -> Result<u64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl CredentialStore for DbRepository {
    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, AuthError> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<(), AuthError> {
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AuthError::UsernameTaken(username.to_string())
                }
                other => AuthError::Storage(other.to_string()),
            })?;
        Ok(())
    }

    async fn user_count(&self) -> Result<u64, AuthError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        Ok(count.max(0) as u64)
    }
}
