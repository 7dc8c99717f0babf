use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use marmor_core::domain::audit::{AuditKind, AuditLogEntry};

use super::RepositoryError;
use crate::DbPool;

/// Read side of the append-only deletion log. Writes happen inside the
/// deletion panel's transactions, never through this type.
pub struct SqlAuditLogRepository {
    pool: DbPool,
}

impl SqlAuditLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Entries newest-first, the order the history panel displays them.
    pub async fn list(&self) -> Result<Vec<AuditLogEntry>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, recorded_at, kind, employee, month
             FROM audit_log
             ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(entry_from_row).collect()
    }
}

fn entry_from_row(row: SqliteRow) -> Result<AuditLogEntry, RepositoryError> {
    let kind_raw = row.get::<String, _>("kind");
    let kind = AuditKind::from_label(&kind_raw)
        .ok_or_else(|| RepositoryError::Decode(format!("unknown audit kind `{kind_raw}`")))?;

    let recorded_raw = row.get::<String, _>("recorded_at");
    let recorded_at = DateTime::parse_from_rfc3339(&recorded_raw)
        .map_err(|_| RepositoryError::Decode(format!("invalid audit timestamp `{recorded_raw}`")))?
        .with_timezone(&Utc);

    Ok(AuditLogEntry {
        id: row.get::<i64, _>("id"),
        recorded_at,
        kind,
        employee: row.get("employee"),
        month: row.get("month"),
    })
}
