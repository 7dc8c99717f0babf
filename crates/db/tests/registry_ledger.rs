use chrono::NaiveDate;
use rust_decimal::Decimal;

use marmor_core::domain::month::Month;
use marmor_core::domain::sale::{Path, SaleFigures};
use marmor_core::errors::DomainError;
use marmor_db::{connect_with_settings, ensure_schema, DbPool};
use marmor_db::{LedgerError, RepositoryError, SalesLedger, SqlEmployeeRepository};

async fn test_pool() -> DbPool {
    // A single connection keeps the in-memory database alive and shared.
    let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    ensure_schema(&pool).await.expect("schema bootstrap");
    pool
}

fn date(value: &str) -> NaiveDate {
    value.parse().expect("date literal")
}

fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}

fn figures(rochas: &str, decorativos: &str, itens: &str) -> SaleFigures {
    SaleFigures { rochas: dec(rochas), decorativos: dec(decorativos), itens: dec(itens) }
}

#[tokio::test]
async fn schema_bootstrap_is_idempotent() {
    let pool = test_pool().await;
    ensure_schema(&pool).await.expect("second bootstrap is a no-op");
    ensure_schema(&pool).await.expect("third bootstrap is a no-op");
}

#[tokio::test]
async fn duplicate_registration_keeps_the_first_admission_date() {
    let pool = test_pool().await;
    let registry = SqlEmployeeRepository::new(pool.clone());

    registry.register("Ana", date("2020-01-01")).await.expect("first registration");
    let error = registry
        .register("Ana", date("2030-05-05"))
        .await
        .expect_err("second registration must conflict");
    assert!(matches!(error, RepositoryError::DuplicateEmployee { ref name } if name == "Ana"));

    assert_eq!(registry.list_names().await.expect("list"), vec!["Ana".to_string()]);
    assert_eq!(
        registry.get_admission_date("Ana").await.expect("admission date"),
        date("2020-01-01"),
        "conflicting registration must not overwrite"
    );
}

#[tokio::test]
async fn names_are_case_sensitive_and_listed_in_stable_order() {
    let pool = test_pool().await;
    let registry = SqlEmployeeRepository::new(pool.clone());

    registry.register("ana", date("2021-01-01")).await.expect("lowercase");
    registry.register("Ana", date("2021-01-01")).await.expect("distinct capitalized name");

    let names = registry.list_names().await.expect("list");
    assert_eq!(names, vec!["Ana".to_string(), "ana".to_string()]);
}

#[tokio::test]
async fn lookup_and_delete_report_unknown_employees() {
    let pool = test_pool().await;
    let registry = SqlEmployeeRepository::new(pool.clone());

    let error = registry.get_admission_date("Nina").await.expect_err("unknown lookup");
    assert!(error.is_not_found());

    let error = registry.delete("Nina").await.expect_err("unknown delete is reported");
    assert!(error.is_not_found());
}

#[tokio::test]
async fn record_sale_persists_engine_output() {
    let pool = test_pool().await;
    let registry = SqlEmployeeRepository::new(pool.clone());
    let ledger = SalesLedger::new(pool.clone());

    registry.register("Ana", date("2020-01-01")).await.expect("register");
    let record = ledger
        .record_sale_as_of("Ana", Month::Jan, figures("1000", "500", "3500"), date("2024-01-01"))
        .await
        .expect("record sale");

    assert_eq!(record.path, Path::C);
    assert_eq!(record.total, dec("5000"));
    assert_eq!(record.commission, dec("60"), "1000*0.0375 + 500*0.045");
    assert_eq!(record.forge_bonus, dec("100"), "floor(3500/1500) = 2 increments");
    assert_eq!(record.loyalty_bonus, dec("6"), "4 completed years * 0.001 * 1500");

    let stored = ledger.query_all().await.expect("query all");
    assert_eq!(stored, vec![record]);
}

#[tokio::test]
async fn record_sale_rejects_unknown_employee() {
    let pool = test_pool().await;
    let ledger = SalesLedger::new(pool.clone());

    let error = ledger
        .record_sale("Nina", Month::Jan, figures("0", "0", "0"))
        .await
        .expect_err("unknown employee");
    assert!(matches!(
        error,
        LedgerError::Repository(RepositoryError::NotFound { ref name }) if name == "Nina"
    ));
}

#[tokio::test]
async fn record_sale_rejects_negative_amounts_and_persists_nothing() {
    let pool = test_pool().await;
    let registry = SqlEmployeeRepository::new(pool.clone());
    let ledger = SalesLedger::new(pool.clone());

    registry.register("Ana", date("2020-01-01")).await.expect("register");
    let error = ledger
        .record_sale("Ana", Month::Jan, figures("-100", "0", "0"))
        .await
        .expect_err("negative rochas");
    assert!(matches!(
        error,
        LedgerError::Domain(DomainError::NegativeAmount { category: "rochas", .. })
    ));

    assert!(ledger.query_all().await.expect("query all").is_empty());
}

#[tokio::test]
async fn queries_filter_by_month_and_employee() {
    let pool = test_pool().await;
    let registry = SqlEmployeeRepository::new(pool.clone());
    let ledger = SalesLedger::new(pool.clone());

    let today = date("2024-06-01");
    registry.register("Ana", today).await.expect("register Ana");
    registry.register("Bia", today).await.expect("register Bia");

    ledger
        .record_sale_as_of("Ana", Month::Jan, figures("100", "0", "1600"), today)
        .await
        .expect("Ana Jan");
    ledger
        .record_sale_as_of("Ana", Month::Fev, figures("200", "0", "1600"), today)
        .await
        .expect("Ana Fev");
    ledger
        .record_sale_as_of("Bia", Month::Jan, figures("300", "0", "1600"), today)
        .await
        .expect("Bia Jan");

    let january = ledger.query_by_month(Month::Jan).await.expect("by month");
    assert_eq!(january.len(), 2);
    assert!(january.iter().all(|record| record.month == Month::Jan));

    let anas = ledger.query_by_employee("Ana").await.expect("by employee");
    assert_eq!(anas.len(), 2);
    assert!(anas.iter().all(|record| record.employee == "Ana"));
}

#[tokio::test]
async fn ledger_deletions_return_removed_counts() {
    let pool = test_pool().await;
    let registry = SqlEmployeeRepository::new(pool.clone());
    let ledger = SalesLedger::new(pool.clone());

    let today = date("2024-06-01");
    registry.register("Ana", today).await.expect("register");
    for month in [Month::Jan, Month::Jan, Month::Fev] {
        ledger
            .record_sale_as_of("Ana", month, figures("100", "0", "1600"), today)
            .await
            .expect("record");
    }

    let removed =
        ledger.delete_by_employee_and_month("Ana", Month::Jan).await.expect("month delete");
    assert_eq!(removed, 2);

    let removed = ledger.delete_by_employee("Ana").await.expect("employee delete");
    assert_eq!(removed, 1);

    let removed = ledger.delete_by_employee("Ana").await.expect("nothing left");
    assert_eq!(removed, 0);
}
