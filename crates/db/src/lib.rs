pub mod connection;
pub mod ledger;
pub mod panel;
pub mod repositories;
pub mod schema;

pub use connection::{connect, connect_with_settings, DbPool};
pub use ledger::{LedgerError, SalesLedger};
pub use panel::{DeletionPanel, PanelError, PurgeOutcome};
pub use repositories::{
    RepositoryError, SqlAuditLogRepository, SqlEmployeeRepository, SqlSaleRepository,
};
pub use schema::ensure_schema;
