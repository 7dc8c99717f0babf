//! Idempotent schema bootstrap.
//!
//! Three logical tables: the employee registry, the sales ledger and the
//! append-only deletion audit log. Money columns are TEXT holding decimal
//! strings; dates and timestamps are ISO-8601 TEXT. Every statement is
//! `IF NOT EXISTS`, so bootstrap can run on every start.

use crate::DbPool;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        admitted_on TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sales (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee TEXT NOT NULL,
        month TEXT NOT NULL,
        rochas TEXT NOT NULL,
        decorativos TEXT NOT NULL,
        itens TEXT NOT NULL,
        total TEXT NOT NULL,
        path TEXT NOT NULL,
        commission TEXT NOT NULL,
        loyalty_bonus TEXT NOT NULL,
        forge_bonus TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS audit_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recorded_at TEXT NOT NULL,
        kind TEXT NOT NULL,
        employee TEXT NOT NULL,
        month TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_sales_employee ON sales (employee)",
    "CREATE INDEX IF NOT EXISTS idx_sales_employee_month ON sales (employee, month)",
];

pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
