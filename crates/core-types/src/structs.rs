use crate::enums::Gender;
use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Performance is rated on a 1-5 scale.
pub const PERFORMANCE_SCORE_RANGE: RangeInclusive<u8> = 1..=5;

/// Score assigned when a new hire has not been rated yet.
pub const DEFAULT_PERFORMANCE_SCORE: u8 = 3;

pub const AGE_RANGE: RangeInclusive<i32> = 18..=70;

/// Salaries are stored as `NUMERIC(14, 2)`: at most 12 integer digits and cents.
pub const SALARY_SCALE: u32 = 2;
/// 99_999_999_999_999 with `SALARY_SCALE` (i.e. 999_999_999_999.99), built
/// from its 96-bit parts because `Decimal::new` is not `const`.
pub const MAX_SALARY: Decimal = Decimal::from_parts(0x107a3fff, 0x5af3, 0, false, SALARY_SCALE);

/// The `promotion_count` column is a Postgres `INTEGER`.
pub const MAX_PROMOTION_COUNT: u32 = i32::MAX as u32;

/// A single employee record as owned by the repository.
///
/// The field order here is also the column order of the CSV export, so the
/// header row always matches the attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub role: String,
    pub department: String,
    pub salary: Decimal,
    pub date_of_joining: NaiveDate,
    pub performance_score: u8,
    pub promotion_count: u32,
}

impl Employee {
    /// The calendar year the employee joined, used by year filters.
    pub fn joining_year(&self) -> i32 {
        self.date_of_joining.year()
    }
}

/// The payload for hiring a new employee. The repository assigns the id and
/// starts the promotion count at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub role: String,
    pub department: String,
    pub salary: Decimal,
    pub date_of_joining: NaiveDate,
    #[serde(default = "default_performance_score")]
    pub performance_score: u8,
}

fn default_performance_score() -> u8 {
    DEFAULT_PERFORMANCE_SCORE
}

impl NewEmployee {
    /// Trims the free-text fields and checks every invariant of an `Employee`.
    ///
    /// Returns the normalised payload so callers store exactly what was validated.
    pub fn validate(mut self) -> Result<Self, CoreError> {
        self.name = required("name", &self.name)?;
        self.department = required("department", &self.department)?;
        self.role = self.role.trim().to_string();
        check_age(self.age)?;
        check_salary(self.salary)?;
        check_performance(self.performance_score)?;
        Ok(self)
    }

    /// Materialises the record once the repository has picked an id.
    pub fn into_employee(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            role: self.role,
            department: self.department,
            salary: self.salary,
            date_of_joining: self.date_of_joining,
            performance_score: self.performance_score,
            promotion_count: 0,
        }
    }
}

/// A full replacement of the mutable fields of an employee. The id never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub role: String,
    pub department: String,
    pub salary: Decimal,
    pub date_of_joining: NaiveDate,
    pub performance_score: u8,
    pub promotion_count: u32,
}

impl EmployeeUpdate {
    pub fn validate(mut self) -> Result<Self, CoreError> {
        self.name = required("name", &self.name)?;
        self.department = required("department", &self.department)?;
        self.role = self.role.trim().to_string();
        check_age(self.age)?;
        check_salary(self.salary)?;
        check_performance(self.performance_score)?;
        if self.promotion_count > MAX_PROMOTION_COUNT {
            return Err(CoreError::invalid(
                "promotion_count",
                format!("{} is above {}", self.promotion_count, MAX_PROMOTION_COUNT),
            ));
        }
        Ok(self)
    }

    pub fn apply_to(self, employee: &mut Employee) {
        employee.name = self.name;
        employee.age = self.age;
        employee.gender = self.gender;
        employee.role = self.role;
        employee.department = self.department;
        employee.salary = self.salary;
        employee.date_of_joining = self.date_of_joining;
        employee.performance_score = self.performance_score;
        employee.promotion_count = self.promotion_count;
    }
}

impl From<&Employee> for EmployeeUpdate {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            age: employee.age,
            gender: employee.gender,
            role: employee.role.clone(),
            department: employee.department.clone(),
            salary: employee.salary,
            date_of_joining: employee.date_of_joining,
            performance_score: employee.performance_score,
            promotion_count: employee.promotion_count,
        }
    }
}

fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn check_age(age: i32) -> Result<(), CoreError> {
    if !AGE_RANGE.contains(&age) {
        return Err(CoreError::invalid(
            "age",
            format!("{} is outside {}..={}", age, AGE_RANGE.start(), AGE_RANGE.end()),
        ));
    }
    Ok(())
}

/// Checks a salary against what the `employees` table can hold.
pub fn check_salary(salary: Decimal) -> Result<(), CoreError> {
    if salary < Decimal::ZERO {
        return Err(CoreError::invalid("salary", "must not be negative"));
    }
    if salary > MAX_SALARY {
        return Err(CoreError::invalid(
            "salary",
            format!("{} is above {}", salary, MAX_SALARY),
        ));
    }
    if salary.normalize().scale() > SALARY_SCALE {
        return Err(CoreError::invalid(
            "salary",
            format!("{} has more than {} decimal places", salary, SALARY_SCALE),
        ));
    }
    Ok(())
}

fn check_performance(score: u8) -> Result<(), CoreError> {
    if !PERFORMANCE_SCORE_RANGE.contains(&score) {
        return Err(CoreError::invalid(
            "performance_score",
            format!(
                "{} is outside {}..={}",
                score,
                PERFORMANCE_SCORE_RANGE.start(),
                PERFORMANCE_SCORE_RANGE.end()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn hire() -> NewEmployee {
        NewEmployee {
            name: "  Aarav Sharma ".to_string(),
            age: 28,
            gender: Gender::M,
            role: "Developer".to_string(),
            department: "IT".to_string(),
            salary: dec!(55000),
            date_of_joining: NaiveDate::from_ymd_opt(2021, 6, 15).unwrap(),
            performance_score: 4,
        }
    }

    #[test]
    fn validate_trims_free_text() {
        let hire = hire().validate().unwrap();
        assert_eq!(hire.name, "Aarav Sharma");

        let employee = hire.into_employee(7);
        assert_eq!(employee.id, 7);
        assert_eq!(employee.promotion_count, 0);
        assert_eq!(employee.joining_year(), 2021);
    }

    #[test]
    fn validate_rejects_broken_invariants() {
        let blank_name = NewEmployee { name: "   ".to_string(), ..hire() };
        assert!(matches!(blank_name.validate(), Err(CoreError::InvalidInput(f, _)) if f == "name"));

        let negative = NewEmployee { salary: dec!(-1), ..hire() };
        assert!(matches!(negative.validate(), Err(CoreError::InvalidInput(f, _)) if f == "salary"));

        let overrated = NewEmployee { performance_score: 6, ..hire() };
        assert!(overrated.validate().is_err());

        let underage = NewEmployee { age: 16, ..hire() };
        assert!(underage.validate().is_err());
    }

    #[test]
    fn zero_salary_is_allowed() {
        let intern = NewEmployee { salary: Decimal::ZERO, ..hire() };
        assert!(intern.validate().is_ok());
    }

    #[test]
    fn salary_must_fit_the_column() {
        let huge = NewEmployee { salary: dec!(50000000000000000000000000000), ..hire() };
        assert!(matches!(huge.validate(), Err(CoreError::InvalidInput(f, _)) if f == "salary"));

        let fractional = NewEmployee { salary: dec!(1000.005), ..hire() };
        assert!(fractional.validate().is_err());

        let trailing_zeros = NewEmployee { salary: dec!(1000.500), ..hire() };
        assert!(trailing_zeros.validate().is_ok());

        let largest = NewEmployee { salary: MAX_SALARY, ..hire() };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn promotion_count_must_fit_the_column() {
        let employee = hire().validate().unwrap().into_employee(1);
        let update = EmployeeUpdate { promotion_count: u32::MAX, ..EmployeeUpdate::from(&employee) };

        let err = update.validate().unwrap_err();

        assert!(matches!(err, CoreError::InvalidInput(f, _) if f == "promotion_count"));
    }

    #[test]
    fn new_employee_defaults_performance_score() {
        let json = r#"{
            "name": "Meera Patel", "age": 32, "gender": "F",
            "department": "HR", "salary": 48000, "date_of_joining": "2019-03-20"
        }"#;
        let hire: NewEmployee = serde_json::from_str(json).unwrap();
        assert_eq!(hire.performance_score, DEFAULT_PERFORMANCE_SCORE);
        assert_eq!(hire.role, "");
    }
}
