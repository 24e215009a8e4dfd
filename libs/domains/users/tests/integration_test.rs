//! Integration tests for the Users domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Raw SQL queries work against the migrated schema
//! - Ids are assigned by the database
//! - Pagination is stable in id order
//!
//! They are ignored by default because they need a running Docker daemon.

use chrono::NaiveDate;
use domain_users::*;
use test_utils::{TestDatabase, TestDataBuilder};

fn dob(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let name = builder.name("user", "main");
    let date_of_birth = builder.date_of_birth();

    let id = repo.create(&name, date_of_birth).await.unwrap();
    assert!(id > 0);

    let retrieved = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(retrieved.id, id);
    assert_eq!(retrieved.name, name);
    assert_eq!(retrieved.date_of_birth, date_of_birth);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_missing_user_returns_none() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    assert!(repo.get_by_id(999_999).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_user_full_replace() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_replace");

    let id = repo
        .create(&builder.name("user", "before"), dob("1990-06-15"))
        .await
        .unwrap();

    repo.update(id, &builder.name("user", "after"), dob("1991-01-01"))
        .await
        .unwrap();

    let retrieved = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(retrieved.name, builder.name("user", "after"));
    assert_eq!(retrieved.date_of_birth, dob("1991-01-01"));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_missing_user_is_silent() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    // UPDATE with no matching row affects nothing and reports no error
    repo.update(999_999, "Nobody", dob("1990-06-15"))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_user_reports_whether_row_existed() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_reports");

    let id = repo
        .create(&builder.name("user", "doomed"), dob("1990-06-15"))
        .await
        .unwrap();

    assert!(repo.delete(id).await.unwrap());
    assert!(repo.get_by_id(id).await.unwrap().is_none());
    assert!(!repo.delete(id).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_users_pages_in_id_order() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_pages");

    let mut ids = Vec::new();
    for i in 0..5 {
        let id = repo
            .create(&builder.name("user", &format!("u{}", i)), dob("1990-06-15"))
            .await
            .unwrap();
        ids.push(id);
    }

    let page = repo.list(2, 0).await.unwrap();
    assert_eq!(page.iter().map(|u| u.id).collect::<Vec<_>>(), &ids[..2]);

    let page = repo.list(2, 4).await.unwrap();
    assert_eq!(page.iter().map(|u| u.id).collect::<Vec<_>>(), &ids[4..]);

    // Out-of-range offsets yield an empty page, never an error
    let page = repo.list(2, 100).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_service_round_trip_against_postgres() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("service_round_trip");

    let created = service
        .create_user(CreateUser {
            name: builder.name("user", "svc"),
            dob: "1990-06-15".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(created.dob, "1990-06-15");
    assert!(created.age > 0);

    let fetched = service.get_user(created.id).await.unwrap();
    assert_eq!(fetched.name, created.name);

    service.delete_user(created.id).await.unwrap();

    let err = service.get_user(created.id).await.unwrap_err();
    assert!(matches!(err, UserError::NotFound(_)));
}
