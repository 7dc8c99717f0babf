use rust_decimal::Decimal;

use marmor_core::domain::month::Month;
use marmor_core::domain::sale::SaleFigures;
use marmor_db::SalesLedger;

use crate::commands::{execute, CommandResult, Completion, Failure};

fn parse_amount(label: &str, value: &str) -> Result<Decimal, Failure> {
    value
        .parse::<Decimal>()
        .map_err(|_| Failure::validation(format!("invalid {label} amount `{value}`")))
}

pub fn run(
    name: String,
    month: String,
    rochas: String,
    decorativos: String,
    itens: String,
) -> CommandResult {
    execute("record", |pool, _config| async move {
        let month = month
            .parse::<Month>()
            .map_err(|error| Failure::validation(error.to_string()))?;
        let figures = SaleFigures {
            rochas: parse_amount("rochas", &rochas)?,
            decorativos: parse_amount("decorativos", &decorativos)?,
            itens: parse_amount("itens", &itens)?,
        };

        let ledger = SalesLedger::new(pool);
        let record = ledger.record_sale(&name, month, figures).await?;

        Ok(Completion::Done(format!(
            "sale #{id} recorded for `{name}` ({month}): path {path}, total {total}, \
             commission {commission}, loyalty {loyalty}, forge {forge}",
            id = record.id,
            month = record.month,
            path = record.path,
            total = record.total,
            commission = record.commission,
            loyalty = record.loyalty_bonus,
            forge = record.forge_bonus,
        )))
    })
}
