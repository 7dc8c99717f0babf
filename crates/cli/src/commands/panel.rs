//! Gated destructive operations. The configured admin secret is the
//! reference value; `--secret` is what the operator submits against it.

use marmor_core::config::AppConfig;
use marmor_core::domain::month::Month;
use marmor_core::gate::AdminGate;
use marmor_db::{DbPool, DeletionPanel, PurgeOutcome};

use crate::commands::{execute, CommandResult, Completion, Failure};

fn panel(pool: DbPool, config: &AppConfig) -> DeletionPanel {
    DeletionPanel::new(pool, AdminGate::new(config.admin.secret.clone()))
}

fn describe(outcome: &PurgeOutcome) -> String {
    format!(
        "{kind} for `{employee}`: {count} sale record(s) removed",
        kind = outcome.kind,
        employee = outcome.employee,
        count = outcome.sales_removed,
    )
}

pub fn delete_employee(name: String, secret: String) -> CommandResult {
    execute("delete-employee", |pool, config| async move {
        let outcome = panel(pool, &config).delete_employee(&secret, &name).await?;
        Ok(Completion::Done(describe(&outcome)))
    })
}

pub fn delete_month(name: String, month: String, secret: String) -> CommandResult {
    execute("delete-month", |pool, config| async move {
        let month = month
            .parse::<Month>()
            .map_err(|error| Failure::validation(error.to_string()))?;
        let outcome = panel(pool, &config).delete_month(&secret, &name, month).await?;
        Ok(Completion::Done(describe(&outcome)))
    })
}

pub fn reset(name: String, secret: String) -> CommandResult {
    execute("reset", |pool, config| async move {
        let outcome = panel(pool, &config).reset_employee(&secret, &name).await?;
        Ok(Completion::Done(describe(&outcome)))
    })
}
