use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::month::Month;
use crate::errors::DomainError;

/// Tiered classification of a sale, decided by the `itens` amount alone.
/// `Unranked` is rendered as `-` everywhere the original surface shows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Path {
    C,
    B,
    A,
    Unranked,
}

impl Path {
    pub fn as_str(&self) -> &'static str {
        match self {
            Path::C => "C",
            Path::B => "B",
            Path::A => "A",
            Path::Unranked => "-",
        }
    }
}

impl std::str::FromStr for Path {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "C" => Ok(Path::C),
            "B" => Ok(Path::B),
            "A" => Ok(Path::A),
            "-" => Ok(Path::Unranked),
            other => Err(DomainError::UnknownPath(other.to_string())),
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw category amounts as submitted, before the engine runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleFigures {
    pub rochas: Decimal,
    pub decorativos: Decimal,
    pub itens: Decimal,
}

/// A persisted sale row. Computed fields are written once at creation and
/// never edited afterwards; the only mutations the ledger knows are deletes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: i64,
    pub employee: String,
    pub month: Month,
    pub rochas: Decimal,
    pub decorativos: Decimal,
    pub itens: Decimal,
    pub total: Decimal,
    pub path: Path,
    pub commission: Decimal,
    pub loyalty_bonus: Decimal,
    pub forge_bonus: Decimal,
}
