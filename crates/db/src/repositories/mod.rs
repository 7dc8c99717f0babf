use thiserror::Error;

pub mod audit;
pub mod employee;
pub mod sale;

pub use audit::SqlAuditLogRepository;
pub use employee::SqlEmployeeRepository;
pub use sale::SqlSaleRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("employee `{name}` is already registered")]
    DuplicateEmployee { name: String },
    #[error("employee `{name}` is not registered")]
    NotFound { name: String },
}

impl RepositoryError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RepositoryError::DuplicateEmployee { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}
