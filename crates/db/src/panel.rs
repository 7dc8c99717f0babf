//! Restricted deletion panel.
//!
//! Every operation verifies the shared secret before touching the pool, and
//! runs the mutation together with its audit entry in one transaction: a
//! deletion is never durable without its audit trail, and a denied secret
//! leaves both tables untouched. All three operations target the same
//! `sales` table the ledger writes.

use chrono::Utc;
use thiserror::Error;

use marmor_core::domain::audit::{AuditKind, AuditLogEntry, NO_MONTH};
use marmor_core::domain::month::Month;
use marmor_core::errors::GateError;
use marmor_core::gate::AdminGate;

use crate::repositories::{RepositoryError, SqlAuditLogRepository};
use crate::DbPool;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for PanelError {
    fn from(error: sqlx::Error) -> Self {
        PanelError::Repository(RepositoryError::Database(error))
    }
}

/// Outcome of a destructive operation, for operator confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurgeOutcome {
    pub kind: AuditKind,
    pub employee: String,
    pub sales_removed: u64,
}

pub struct DeletionPanel {
    pool: DbPool,
    gate: AdminGate,
}

impl DeletionPanel {
    pub fn new(pool: DbPool, gate: AdminGate) -> Self {
        Self { pool, gate }
    }

    fn verify(&self, secret: &str, operation: &'static str) -> Result<(), PanelError> {
        self.gate.verify(secret).map_err(|error| {
            tracing::warn!(operation, "deletion panel access denied");
            PanelError::from(error)
        })
    }

    /// Removes the employee and every sale they recorded.
    pub async fn delete_employee(
        &self,
        secret: &str,
        name: &str,
    ) -> Result<PurgeOutcome, PanelError> {
        self.verify(secret, "delete_employee")?;

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM employees WHERE name = ?")
            .bind(name)
            .execute(&mut *tx)
            .await?;
        if removed.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { name: name.to_string() }.into());
        }

        let sales_removed = sqlx::query("DELETE FROM sales WHERE employee = ?")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        append_audit(&mut tx, AuditKind::FullDeletion, name, NO_MONTH).await?;
        tx.commit().await?;

        tracing::info!(employee = name, sales_removed, "employee fully deleted");
        Ok(PurgeOutcome {
            kind: AuditKind::FullDeletion,
            employee: name.to_string(),
            sales_removed,
        })
    }

    /// Removes one employee's sales for a single month.
    pub async fn delete_month(
        &self,
        secret: &str,
        name: &str,
        month: Month,
    ) -> Result<PurgeOutcome, PanelError> {
        self.verify(secret, "delete_month")?;

        let mut tx = self.pool.begin().await?;
        ensure_registered(&mut tx, name).await?;

        let sales_removed = sqlx::query("DELETE FROM sales WHERE employee = ? AND month = ?")
            .bind(name)
            .bind(month.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        append_audit(&mut tx, AuditKind::MonthlyDeletion, name, month.as_str()).await?;
        tx.commit().await?;

        tracing::info!(employee = name, month = %month, sales_removed, "monthly sales deleted");
        Ok(PurgeOutcome {
            kind: AuditKind::MonthlyDeletion,
            employee: name.to_string(),
            sales_removed,
        })
    }

    /// Removes all of an employee's sales but keeps the registration.
    pub async fn reset_employee(
        &self,
        secret: &str,
        name: &str,
    ) -> Result<PurgeOutcome, PanelError> {
        self.verify(secret, "reset_employee")?;

        let mut tx = self.pool.begin().await?;
        ensure_registered(&mut tx, name).await?;

        let sales_removed = sqlx::query("DELETE FROM sales WHERE employee = ?")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        append_audit(&mut tx, AuditKind::DataReset, name, NO_MONTH).await?;
        tx.commit().await?;

        tracing::info!(employee = name, sales_removed, "employee sales reset");
        Ok(PurgeOutcome { kind: AuditKind::DataReset, employee: name.to_string(), sales_removed })
    }

    /// Deletion history, newest entries first.
    pub async fn audit_log(&self) -> Result<Vec<AuditLogEntry>, PanelError> {
        Ok(SqlAuditLogRepository::new(self.pool.clone()).list().await?)
    }
}

async fn ensure_registered(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    name: &str,
) -> Result<(), PanelError> {
    let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM employees WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    if exists.is_none() {
        return Err(RepositoryError::NotFound { name: name.to_string() }.into());
    }
    Ok(())
}

async fn append_audit(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    kind: AuditKind,
    employee: &str,
    month: &str,
) -> Result<(), PanelError> {
    sqlx::query("INSERT INTO audit_log (recorded_at, kind, employee, month) VALUES (?, ?, ?, ?)")
        .bind(Utc::now().to_rfc3339())
        .bind(kind.as_str())
        .bind(employee)
        .bind(month)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
