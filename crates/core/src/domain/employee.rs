use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A registered salesperson. Names are unique across the registry,
/// compared case-sensitively with no normalization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub admitted_on: NaiveDate,
}

/// Parses an admission date from operator input.
pub fn parse_admission_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DomainError::MalformedDate(value.to_string()))
}
