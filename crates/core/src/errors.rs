use rust_decimal::Decimal;
use thiserror::Error;

/// Input-contract violations caught before anything touches storage.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("negative amount for {category}: {amount}")]
    NegativeAmount { category: &'static str, amount: Decimal },
    #[error("unknown reference month `{0}` (expected Jan..Dez)")]
    UnknownMonth(String),
    #[error("unknown path classification `{0}` (expected A, B, C or -)")]
    UnknownPath(String),
    #[error("malformed date `{0}` (expected YYYY-MM-DD)")]
    MalformedDate(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("access denied: deletion panel secret mismatch")]
    AccessDenied,
}
