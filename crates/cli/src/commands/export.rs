use std::path::PathBuf;

use marmor_core::domain::month::Month;
use marmor_core::export::to_delimited_text;
use marmor_db::SalesLedger;

use crate::commands::{execute, CommandResult, Completion, Failure};

pub fn run(month: Option<String>, output: PathBuf) -> CommandResult {
    execute("export", |pool, _config| async move {
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

        let text = to_delimited_text(&records);
        tokio::fs::write(&output, text.as_bytes()).await.map_err(|error| Failure {
            error_class: "io",
            message: format!("could not write `{}`: {error}", output.display()),
            exit_code: 8,
        })?;

        Ok(Completion::Done(format!(
            "exported {count} record(s) to {path}",
            count = records.len(),
            path = output.display(),
        )))
    })
}
