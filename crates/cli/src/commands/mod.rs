pub mod audit;
pub mod export;
pub mod init;
pub mod panel;
pub mod record;
pub mod register;
pub mod report;
pub mod summary;

use std::future::Future;

use serde::Serialize;

use marmor_core::config::{AppConfig, LoadOptions};
use marmor_db::{connect, ensure_schema, DbPool, LedgerError, PanelError, RepositoryError};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    /// Recoverable, expected conditions (e.g. duplicate registration)
    /// surface as a warning and do not fail the invocation.
    pub fn warning(command: &str, error_class: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "warning".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// How a command body finished when it did not hard-fail.
pub(crate) enum Completion {
    Done(String),
    Warning { error_class: &'static str, message: String },
}

pub(crate) struct Failure {
    pub error_class: &'static str,
    pub message: String,
    pub exit_code: u8,
}

impl Failure {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self { error_class: "validation", message: message.into(), exit_code: 5 }
    }
}

impl From<RepositoryError> for Failure {
    fn from(error: RepositoryError) -> Self {
        match &error {
            RepositoryError::DuplicateEmployee { .. } => {
                Self { error_class: "duplicate_employee", message: error.to_string(), exit_code: 5 }
            }
            RepositoryError::NotFound { .. } => {
                Self { error_class: "not_found", message: error.to_string(), exit_code: 6 }
            }
            _ => Self { error_class: "persistence", message: error.to_string(), exit_code: 4 },
        }
    }
}

impl From<LedgerError> for Failure {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::Domain(domain) => Failure::validation(domain.to_string()),
            LedgerError::Repository(repository) => repository.into(),
        }
    }
}

impl From<PanelError> for Failure {
    fn from(error: PanelError) -> Self {
        match error {
            PanelError::Gate(gate) => {
                Self { error_class: "access_denied", message: gate.to_string(), exit_code: 7 }
            }
            PanelError::Repository(repository) => repository.into(),
        }
    }
}

/// Shared command scaffold: load config, spin a current-thread runtime,
/// open the pool, make sure the schema exists, run the body.
pub(crate) fn execute<F, Fut>(command: &'static str, body: F) -> CommandResult
where
    F: FnOnce(DbPool, AppConfig) -> Fut,
    Fut: Future<Output = Result<Completion, Failure>>,
{
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                command,
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                command,
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect(&config.database).await.map_err(|error| Failure {
            error_class: "db_connectivity",
            message: error.to_string(),
            exit_code: 4,
        })?;
        ensure_schema(&pool).await.map_err(|error| Failure {
            error_class: "schema",
            message: error.to_string(),
            exit_code: 4,
        })?;

        let completion = body(pool.clone(), config).await;
        pool.close().await;
        completion
    });

    match result {
        Ok(Completion::Done(message)) => CommandResult::success(command, message),
        Ok(Completion::Warning { error_class, message }) => {
            CommandResult::warning(command, error_class, message)
        }
        Err(failure) => {
            CommandResult::failure(command, failure.error_class, failure.message, failure.exit_code)
        }
    }
}
