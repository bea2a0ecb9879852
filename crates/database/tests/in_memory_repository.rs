use chrono::NaiveDate;
use core_types::{CoreError, EmployeeUpdate, Gender, MAX_PROMOTION_COUNT, NewEmployee};
use database::{DbError, EmployeeStore, InMemoryRepository, seed_sample_employees};
use rust_decimal_macros::dec;

fn hire(name: &str, department: &str) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        age: 29,
        gender: Gender::F,
        role: "Analyst".to_string(),
        department: department.to_string(),
        salary: dec!(50000),
        date_of_joining: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
        performance_score: 3,
    }
}

#[tokio::test]
async fn insert_assigns_increasing_ids() {
    let repo = InMemoryRepository::new();

    let first = repo.insert(hire("Asha", "IT")).await.unwrap();
    let second = repo.insert(hire("Bilal", "HR")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.promotion_count, 0);

    let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let repo = InMemoryRepository::new();
    let first = repo.insert(hire("Asha", "IT")).await.unwrap();

    repo.delete(first.id).await.unwrap();
    let next = repo.insert(hire("Bilal", "IT")).await.unwrap();

    assert_eq!(next.id, 2);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn invalid_payloads_are_rejected_at_the_boundary() {
    let repo = InMemoryRepository::new();
    let broke = NewEmployee {
        salary: dec!(-10),
        ..hire("Asha", "IT")
    };

    let err = repo.insert(broke).await.unwrap_err();

    assert!(matches!(err, DbError::Validation(CoreError::InvalidInput(field, _)) if field == "salary"));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn update_replaces_mutable_fields() {
    let repo = InMemoryRepository::new();
    let employee = repo.insert(hire("Asha", "IT")).await.unwrap();

    let update = EmployeeUpdate {
        department: "Finance".to_string(),
        promotion_count: 4,
        ..EmployeeUpdate::from(&employee)
    };
    let updated = repo.update(employee.id, update).await.unwrap();

    assert_eq!(updated.id, employee.id);
    assert_eq!(updated.department, "Finance");
    assert_eq!(updated.promotion_count, 4);
    assert_eq!(repo.get(employee.id).await.unwrap(), updated);
}

#[tokio::test]
async fn promote_raises_salary_and_counts() {
    let repo = InMemoryRepository::new();
    let employee = repo.insert(hire("Asha", "IT")).await.unwrap();

    let promoted = repo.promote(employee.id, dec!(55000)).await.unwrap();

    assert_eq!(promoted.salary, dec!(55000));
    assert_eq!(promoted.promotion_count, 1);
}

#[tokio::test]
async fn promote_refuses_a_pay_cut() {
    let repo = InMemoryRepository::new();
    let employee = repo.insert(hire("Asha", "IT")).await.unwrap();

    let err = repo.promote(employee.id, dec!(49999)).await.unwrap_err();

    assert!(matches!(err, DbError::Validation(_)));
    assert_eq!(repo.get(employee.id).await.unwrap().promotion_count, 0);
}

#[tokio::test]
async fn promotion_count_is_capped_without_breaking_the_store() {
    let repo = InMemoryRepository::new();
    let employee = repo.insert(hire("Asha", "IT")).await.unwrap();

    let too_many = EmployeeUpdate {
        promotion_count: u32::MAX,
        ..EmployeeUpdate::from(&employee)
    };
    assert!(matches!(
        repo.update(employee.id, too_many).await,
        Err(DbError::Validation(_))
    ));

    let at_cap = EmployeeUpdate {
        promotion_count: MAX_PROMOTION_COUNT,
        ..EmployeeUpdate::from(&employee)
    };
    repo.update(employee.id, at_cap).await.unwrap();

    let err = repo.promote(employee.id, dec!(60000)).await.unwrap_err();
    assert!(matches!(err, DbError::Validation(CoreError::InvalidInput(field, _)) if field == "promotion_count"));

    // The store keeps working after the rejected promotion.
    let unchanged = repo.get(employee.id).await.unwrap();
    assert_eq!(unchanged.promotion_count, MAX_PROMOTION_COUNT);
    assert_eq!(unchanged.salary, dec!(50000));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn promote_rejects_salaries_the_column_cannot_hold() {
    let repo = InMemoryRepository::new();
    let employee = repo.insert(hire("Asha", "IT")).await.unwrap();

    assert!(matches!(
        repo.promote(employee.id, dec!(55000.125)).await,
        Err(DbError::Validation(_))
    ));
    assert!(matches!(
        repo.insert(NewEmployee { salary: dec!(50000000000000000000000000000), ..hire("Bilal", "IT") }).await,
        Err(DbError::Validation(_))
    ));
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let repo = InMemoryRepository::new();

    assert!(matches!(repo.get(42).await, Err(DbError::NotFound(42))));
    assert!(matches!(repo.delete(42).await, Err(DbError::NotFound(42))));
    assert!(matches!(repo.promote(42, dec!(1)).await, Err(DbError::NotFound(42))));
}

#[tokio::test]
async fn seeding_only_fills_an_empty_store() {
    let repo = InMemoryRepository::new();

    assert_eq!(seed_sample_employees(&repo).await.unwrap(), 5);
    assert_eq!(seed_sample_employees(&repo).await.unwrap(), 0);

    let staff = repo.list().await.unwrap();
    assert_eq!(staff.len(), 5);
    let total_promotions: u32 = staff.iter().map(|e| e.promotion_count).sum();
    assert_eq!(total_promotions, 4);
    assert_eq!(staff[2].name, "Rohan Singh");
    assert_eq!(staff[2].joining_year(), 2017);
}
