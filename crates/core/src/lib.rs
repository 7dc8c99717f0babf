pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod export;
pub mod gate;
pub mod report;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::audit::{AuditKind, AuditLogEntry, NO_MONTH};
pub use domain::employee::{parse_admission_date, Employee};
pub use domain::month::Month;
pub use domain::sale::{Path, SaleFigures, SaleRecord};
pub use engine::{
    classify, compute_bonuses, evaluate, tenure_years, Bonuses, Classification, ComputedSale,
};
pub use errors::{DomainError, GateError};
pub use export::{parse_delimited_text, to_delimited_text, ExportParseError};
pub use gate::AdminGate;
pub use report::{aggregate_by_employee_and_path, individual_summary, PathGroup, SummaryTotals};
