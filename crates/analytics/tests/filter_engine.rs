use analytics::export::to_csv_string;
use analytics::{AnalyticsEngine, FilterSpec};
use chrono::NaiveDate;
use core_types::{Employee, Gender};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn employee(id: i64, name: &str, department: &str, salary: Decimal, year: i32) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        age: 30,
        gender: Gender::F,
        role: "Engineer".to_string(),
        department: department.to_string(),
        salary,
        date_of_joining: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
        performance_score: 3,
        promotion_count: 1,
    }
}

/// Three employees across two departments and three joining years.
fn snapshot() -> Vec<Employee> {
    vec![
        employee(1, "Asha", "Eng", dec!(50000), 2019),
        employee(2, "Bilal", "Eng", dec!(70000), 2021),
        employee(3, "Chen", "Sales", dec!(40000), 2022),
    ]
}

fn salaries(employees: &[Employee]) -> Vec<Decimal> {
    employees.iter().map(|e| e.salary).collect()
}

#[test]
fn no_predicates_returns_the_whole_snapshot_in_order() {
    let staff = snapshot();
    let result = AnalyticsEngine::new().apply(&staff, &FilterSpec::new());

    assert_eq!(result.filtered, staff);
    assert_eq!(result.stats.total_count, staff.len());
}

#[test]
fn department_filter_matches_worked_example() {
    let spec = FilterSpec {
        department: Some("Eng".to_string()),
        ..Default::default()
    };

    let result = AnalyticsEngine::new().apply(&snapshot(), &spec);

    assert_eq!(salaries(&result.filtered), vec![dec!(50000), dec!(70000)]);
    assert_eq!(result.stats.average_salary, dec!(60000));
    assert_eq!(result.stats.per_department.len(), 1);
    assert_eq!(result.stats.per_department["Eng"].count, 2);
    assert_eq!(result.stats.per_department["Eng"].average_salary, dec!(60000));
}

#[test]
fn one_sided_salary_bound() {
    let spec = FilterSpec {
        salary_min: Some(dec!(60000)),
        ..Default::default()
    };

    let result = AnalyticsEngine::new().apply(&snapshot(), &spec);

    assert_eq!(salaries(&result.filtered), vec![dec!(70000)]);
    assert_eq!(result.filtered[0].department, "Eng");
    assert_eq!(result.stats.total_count, 1);
    assert_eq!(result.stats.average_salary, dec!(70000));
}

#[test]
fn no_matches_yields_zeroed_aggregates() {
    let spec = FilterSpec {
        salary_min: Some(dec!(1000000)),
        ..Default::default()
    };

    let result = AnalyticsEngine::new().apply(&snapshot(), &spec);

    assert!(result.filtered.is_empty());
    assert_eq!(result.stats.total_count, 0);
    assert_eq!(result.stats.average_salary, Decimal::ZERO);
    assert_eq!(result.stats.average_performance, Decimal::ZERO);
    assert_eq!(result.stats.total_promotions, 0);
    assert!(result.stats.per_department.is_empty());
}

#[test]
fn empty_snapshot_is_not_an_error() {
    let spec = FilterSpec {
        name: Some("anyone".to_string()),
        ..Default::default()
    };

    let result = AnalyticsEngine::new().apply(&[], &spec);

    assert!(result.filtered.is_empty());
    assert_eq!(result.stats.total_count, 0);
    assert_eq!(result.stats.average_salary, Decimal::ZERO);
}

#[test]
fn inverted_range_yields_an_empty_result() {
    let spec = FilterSpec {
        salary_min: Some(dec!(80000)),
        salary_max: Some(dec!(10000)),
        ..Default::default()
    };

    let result = AnalyticsEngine::new().apply(&snapshot(), &spec);

    assert!(result.filtered.is_empty());
    assert_eq!(result.stats.total_count, 0);
}

#[test]
fn filtered_output_is_an_ordered_subsequence() {
    let staff = snapshot();
    let spec = FilterSpec {
        joining_year_min: Some(2020),
        ..Default::default()
    };

    let result = AnalyticsEngine::new().apply(&staff, &spec);
    let ids: Vec<i64> = result.filtered.iter().map(|e| e.id).collect();

    assert_eq!(ids, vec![2, 3]);
    let mut positions = ids
        .iter()
        .map(|id| staff.iter().position(|e| e.id == *id).unwrap());
    let mut last = positions.next().unwrap();
    for position in positions {
        assert!(position > last);
        last = position;
    }
}

#[test]
fn applying_twice_is_idempotent() {
    let staff = snapshot();
    let spec = FilterSpec {
        search: Some("engineer".to_string()),
        departments: vec!["Sales".to_string()],
        ..Default::default()
    };
    let engine = AnalyticsEngine::new();

    let first = engine.apply(&staff, &spec);
    let second = engine.apply(&staff, &spec);

    assert_eq!(first, second);
    assert_eq!(first.filtered.len(), 1);
}

#[test]
fn input_snapshot_is_left_untouched() {
    let staff = snapshot();
    let before = staff.clone();

    let _ = AnalyticsEngine::new().apply(
        &staff,
        &FilterSpec {
            department: Some("Sales".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(staff, before);
}

#[test]
fn csv_export_follows_filtered_order() {
    let spec = FilterSpec {
        department: Some("Eng".to_string()),
        ..Default::default()
    };
    let result = AnalyticsEngine::new().apply(&snapshot(), &spec);

    let csv = to_csv_string(&result.filtered).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,name,"));
    assert!(lines[1].starts_with("1,Asha,"));
    assert!(lines[2].starts_with("2,Bilal,"));
}

/// `snapshot()` with distinct roles and performance scores.
fn rated_snapshot() -> Vec<Employee> {
    let mut staff = snapshot();
    staff[0].performance_score = 2;
    staff[1].performance_score = 4;
    staff[1].role = "Engineering Manager".to_string();
    staff[2].performance_score = 5;
    staff[2].role = "Account Executive".to_string();
    staff
}

fn names(employees: &[Employee]) -> Vec<&str> {
    employees.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn exact_joining_year() {
    let engine = AnalyticsEngine::new();

    let hit = FilterSpec { joining_year: Some(2021), ..Default::default() };
    let result = engine.apply(&snapshot(), &hit);
    assert_eq!(names(&result.filtered), vec!["Bilal"]);
    assert_eq!(result.stats.average_salary, dec!(70000));

    let miss = FilterSpec { joining_year: Some(2020), ..Default::default() };
    let result = engine.apply(&snapshot(), &miss);
    assert!(result.filtered.is_empty());
    assert_eq!(result.stats.total_count, 0);
}

#[test]
fn performance_range_is_inclusive() {
    let engine = AnalyticsEngine::new();
    let staff = rated_snapshot();

    let middle = FilterSpec {
        performance_min: Some(2),
        performance_max: Some(4),
        ..Default::default()
    };
    let result = engine.apply(&staff, &middle);
    assert_eq!(names(&result.filtered), vec!["Asha", "Bilal"]);
    assert_eq!(result.stats.average_performance, dec!(3));

    let top = FilterSpec { performance_min: Some(5), ..Default::default() };
    assert_eq!(names(&engine.apply(&staff, &top).filtered), vec!["Chen"]);

    let bottom = FilterSpec { performance_max: Some(1), ..Default::default() };
    assert!(engine.apply(&staff, &bottom).filtered.is_empty());
}

#[test]
fn role_is_an_exact_match() {
    let engine = AnalyticsEngine::new();
    let staff = rated_snapshot();

    let exact = FilterSpec { role: Some("Engineer".to_string()), ..Default::default() };
    assert_eq!(names(&engine.apply(&staff, &exact).filtered), vec!["Asha"]);

    let partial = FilterSpec { role: Some("Engineering".to_string()), ..Default::default() };
    assert!(engine.apply(&staff, &partial).filtered.is_empty());

    let wrong_case = FilterSpec { role: Some("account executive".to_string()), ..Default::default() };
    assert!(engine.apply(&staff, &wrong_case).filtered.is_empty());
}

#[test]
fn filter_spec_deserializes_with_missing_fields() {
    let spec: FilterSpec = serde_json::from_str(r#"{"department": "Eng"}"#).unwrap();

    assert_eq!(spec.department.as_deref(), Some("Eng"));
    assert!(spec.departments.is_empty());
    assert!(spec.salary_min.is_none());
}
