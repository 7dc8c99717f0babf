use marmor_db::SqlAuditLogRepository;

use crate::commands::{execute, CommandResult, Completion};

pub fn run() -> CommandResult {
    execute("audit", |pool, _config| async move {
        let entries = SqlAuditLogRepository::new(pool).list().await?;
        if entries.is_empty() {
            return Ok(Completion::Done("no deletions recorded yet".to_string()));
        }

        let mut lines = vec![format!("{} deletion(s), newest first:", entries.len())];
        for entry in entries {
            lines.push(format!(
                "  - #{id} {when} {kind} employee=`{employee}` month={month}",
                id = entry.id,
                when = entry.recorded_at.to_rfc3339(),
                kind = entry.kind,
                employee = entry.employee,
                month = entry.month,
            ));
        }
        Ok(Completion::Done(lines.join("\n")))
    })
}
