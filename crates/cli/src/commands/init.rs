use crate::commands::{execute, CommandResult, Completion};

pub fn run() -> CommandResult {
    execute("init", |_pool, config| async move {
        Ok(Completion::Done(format!("schema ready at {}", config.database.url)))
    })
}
