use marmor_core::domain::month::Month;
use marmor_core::report::aggregate_by_employee_and_path;
use marmor_db::SalesLedger;

use crate::commands::{execute, CommandResult, Completion, Failure};

pub fn run(month: Option<String>) -> CommandResult {
    execute("report", |pool, _config| async move {
        let ledger = SalesLedger::new(pool);
        let records = match month {
            Some(raw) => {
                let month = raw
                    .parse::<Month>()
                    .map_err(|error| Failure::validation(error.to_string()))?;
                ledger.query_by_month(month).await?
            }
            None => ledger.query_all().await?,
        };

        if records.is_empty() {
            return Ok(Completion::Done("no sales recorded yet".to_string()));
        }

        let groups = aggregate_by_employee_and_path(&records);
        let mut lines = vec![format!("{} group(s) by employee and path:", groups.len())];
        for group in groups {
            lines.push(format!(
                "  - {employee} [{path}] total={total} commission={commission} \
                 loyalty={loyalty} forge={forge}",
                employee = group.employee,
                path = group.path,
                total = group.totals.total,
                commission = group.totals.commission,
                loyalty = group.totals.loyalty_bonus,
                forge = group.totals.forge_bonus,
            ));
        }
        Ok(Completion::Done(lines.join("\n")))
    })
}
