use marmor_core::domain::employee::parse_admission_date;
use marmor_db::SqlEmployeeRepository;

use crate::commands::{execute, CommandResult, Completion, Failure};

pub fn run(name: String, admitted: String) -> CommandResult {
    execute("register", |pool, _config| async move {
        let admitted_on = parse_admission_date(&admitted)
            .map_err(|error| Failure::validation(error.to_string()))?;

        let registry = SqlEmployeeRepository::new(pool);
        match registry.register(&name, admitted_on).await {
            Ok(()) => Ok(Completion::Done(format!("registered employee `{name}`"))),
            Err(error) if error.is_duplicate() => Ok(Completion::Warning {
                error_class: "duplicate_employee",
                message: format!("employee `{name}` is already registered; nothing changed"),
            }),
            Err(error) => Err(error.into()),
        }
    })
}
