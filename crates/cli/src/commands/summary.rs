use marmor_core::report::individual_summary;
use marmor_db::{SalesLedger, SqlEmployeeRepository};

use crate::commands::{execute, CommandResult, Completion};

pub fn run(name: String) -> CommandResult {
    execute("summary", |pool, _config| async move {
        // Unknown names are an error, not an empty summary.
        let registry = SqlEmployeeRepository::new(pool.clone());
        registry.get(&name).await?;

        let ledger = SalesLedger::new(pool);
        let records = ledger.query_by_employee(&name).await?;
        let totals = individual_summary(&records, &name);

        Ok(Completion::Done(format!(
            "`{name}`: {count} sale(s), total {total}, commission {commission}, \
             loyalty {loyalty}, forge {forge}",
            count = records.len(),
            total = totals.total,
            commission = totals.commission,
            loyalty = totals.loyalty_bonus,
            forge = totals.forge_bonus,
        )))
    })
}
