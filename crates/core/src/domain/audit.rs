use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a destructive panel operation did. The display strings are the
/// labels shown in the deletion history and stored in the audit table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditKind {
    FullDeletion,
    MonthlyDeletion,
    DataReset,
}

impl AuditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditKind::FullDeletion => "Full Deletion",
            AuditKind::MonthlyDeletion => "Monthly Deletion",
            AuditKind::DataReset => "Data Reset",
        }
    }

    pub fn from_label(label: &str) -> Option<AuditKind> {
        [AuditKind::FullDeletion, AuditKind::MonthlyDeletion, AuditKind::DataReset]
            .into_iter()
            .find(|kind| kind.as_str() == label)
    }
}

impl std::fmt::Display for AuditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Month placeholder stored when an operation is not month-scoped.
pub const NO_MONTH: &str = "-";

/// Append-only record of a destructive operation. Never mutated or deleted
/// through the application surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub kind: AuditKind,
    pub employee: String,
    pub month: String,
}
