//! Commission and bonus calculation.
//!
//! Pure functions, no I/O. The ladder on `itens` is evaluated top-down and
//! the first matching threshold wins, so exactly 3500 classifies as C.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::sale::{Path, SaleFigures};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub path: Path,
    pub commission: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bonuses {
    pub loyalty: Decimal,
    pub forge: Decimal,
}

/// Engine output for one submission, ready to be persisted by the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputedSale {
    pub figures: SaleFigures,
    pub total: Decimal,
    pub path: Path,
    pub commission: Decimal,
    pub loyalty_bonus: Decimal,
    pub forge_bonus: Decimal,
}

fn ensure_non_negative(category: &'static str, amount: Decimal) -> Result<(), DomainError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::NegativeAmount { category, amount });
    }
    Ok(())
}

/// Classifies a submission into a path and its commission amount.
pub fn classify(
    rochas: Decimal,
    decorativos: Decimal,
    itens: Decimal,
) -> Result<Classification, DomainError> {
    ensure_non_negative("rochas", rochas)?;
    ensure_non_negative("decorativos", decorativos)?;
    ensure_non_negative("itens", itens)?;

    let classification = if itens >= Decimal::new(3500, 0) {
        Classification {
            path: Path::C,
            commission: rochas * Decimal::new(375, 4) + decorativos * Decimal::new(45, 3),
        }
    } else if itens >= Decimal::new(2500, 0) {
        Classification {
            path: Path::B,
            commission: (rochas + decorativos) * Decimal::new(25, 3),
        }
    } else if itens >= Decimal::new(1500, 0) {
        Classification {
            path: Path::A,
            commission: rochas * Decimal::new(2, 2) + decorativos * Decimal::new(15, 3),
        }
    } else {
        Classification { path: Path::Unranked, commission: Decimal::ZERO }
    };

    Ok(classification)
}

/// Loyalty and forge bonuses for an already classified submission.
///
/// Forge pays 50 per whole 1500-unit increment of `itens`, path C only.
/// Loyalty scales `rochas + decorativos` by 0.001 per completed year of
/// service and is zero for unranked sales.
pub fn compute_bonuses(
    path: Path,
    rochas: Decimal,
    decorativos: Decimal,
    itens: Decimal,
    tenure_years: i64,
) -> Bonuses {
    let forge = if path == Path::C {
        (itens / Decimal::new(1500, 0)).floor() * Decimal::new(50, 0)
    } else {
        Decimal::ZERO
    };

    let loyalty = if path == Path::Unranked {
        Decimal::ZERO
    } else {
        Decimal::from(tenure_years) * Decimal::new(1, 3) * (rochas + decorativos)
    };

    Bonuses { loyalty, forge }
}

/// Whole completed years of service as `floor(days / 365)`.
///
/// The calendar approximation (no leap-year or month/day handling) is the
/// defined business rule and is kept as-is.
pub fn tenure_years(admitted_on: NaiveDate, today: NaiveDate) -> i64 {
    (today - admitted_on).num_days().div_euclid(365)
}

/// Runs the full engine for one submission with an already resolved tenure.
pub fn evaluate(figures: &SaleFigures, tenure_years: i64) -> Result<ComputedSale, DomainError> {
    let Classification { path, commission } =
        classify(figures.rochas, figures.decorativos, figures.itens)?;
    let Bonuses { loyalty, forge } =
        compute_bonuses(path, figures.rochas, figures.decorativos, figures.itens, tenure_years);

    Ok(ComputedSale {
        figures: figures.clone(),
        total: figures.rochas + figures.decorativos + figures.itens,
        path,
        commission,
        loyalty_bonus: loyalty,
        forge_bonus: forge,
    })
}
