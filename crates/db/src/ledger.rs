//! Sales ledger: validates a submission, runs the commission engine against
//! the employee's tenure and persists the computed record, all in one
//! transaction so a sale never lands without its computed fields.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use marmor_core::domain::month::Month;
use marmor_core::domain::sale::{SaleFigures, SaleRecord};
use marmor_core::engine;
use marmor_core::errors::DomainError;

use crate::repositories::{RepositoryError, SqlSaleRepository};
use crate::DbPool;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for LedgerError {
    fn from(error: sqlx::Error) -> Self {
        LedgerError::Repository(RepositoryError::Database(error))
    }
}

pub struct SalesLedger {
    pool: DbPool,
    sales: SqlSaleRepository,
}

impl SalesLedger {
    pub fn new(pool: DbPool) -> Self {
        let sales = SqlSaleRepository::new(pool.clone());
        Self { pool, sales }
    }

    /// Records one sale for a registered employee. Tenure is resolved from
    /// the registry at submission time; the record is immutable afterwards.
    pub async fn record_sale(
        &self,
        employee: &str,
        month: Month,
        figures: SaleFigures,
    ) -> Result<SaleRecord, LedgerError> {
        self.record_sale_as_of(employee, month, figures, Utc::now().date_naive()).await
    }

    /// Same as [`record_sale`](Self::record_sale) with an explicit "today",
    /// which keeps tenure deterministic under test.
    pub async fn record_sale_as_of(
        &self,
        employee: &str,
        month: Month,
        figures: SaleFigures,
        today: NaiveDate,
    ) -> Result<SaleRecord, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let admitted_raw: Option<(String,)> =
            sqlx::query_as("SELECT admitted_on FROM employees WHERE name = ?")
                .bind(employee)
                .fetch_optional(&mut *tx)
                .await?;
        let admitted_raw = admitted_raw
            .ok_or_else(|| RepositoryError::NotFound { name: employee.to_string() })?
            .0;
        let admitted_on = admitted_raw.parse::<NaiveDate>().map_err(|_| {
            RepositoryError::Decode(format!(
                "invalid admission date `{admitted_raw}` for `{employee}`"
            ))
        })?;

        let tenure = engine::tenure_years(admitted_on, today);
        let computed = engine::evaluate(&figures, tenure)?;

        let result = sqlx::query(
            "INSERT INTO sales (
                employee,
                month,
                rochas,
                decorativos,
                itens,
                total,
                path,
                commission,
                loyalty_bonus,
                forge_bonus
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(employee)
        .bind(month.as_str())
        .bind(computed.figures.rochas.to_string())
        .bind(computed.figures.decorativos.to_string())
        .bind(computed.figures.itens.to_string())
        .bind(computed.total.to_string())
        .bind(computed.path.as_str())
        .bind(computed.commission.to_string())
        .bind(computed.loyalty_bonus.to_string())
        .bind(computed.forge_bonus.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let record = SaleRecord {
            id: result.last_insert_rowid(),
            employee: employee.to_string(),
            month,
            rochas: computed.figures.rochas,
            decorativos: computed.figures.decorativos,
            itens: computed.figures.itens,
            total: computed.total,
            path: computed.path,
            commission: computed.commission,
            loyalty_bonus: computed.loyalty_bonus,
            forge_bonus: computed.forge_bonus,
        };

        tracing::info!(
            employee,
            month = %record.month,
            path = %record.path,
            total = %record.total,
            "sale recorded"
        );
        Ok(record)
    }

    pub async fn query_all(&self) -> Result<Vec<SaleRecord>, LedgerError> {
        Ok(self.sales.query_all().await?)
    }

    pub async fn query_by_month(&self, month: Month) -> Result<Vec<SaleRecord>, LedgerError> {
        Ok(self.sales.query_by_month(month).await?)
    }

    pub async fn query_by_employee(&self, name: &str) -> Result<Vec<SaleRecord>, LedgerError> {
        Ok(self.sales.query_by_employee(name).await?)
    }

    /// Removes all of an employee's records, returning the count removed.
    pub async fn delete_by_employee(&self, name: &str) -> Result<u64, LedgerError> {
        let result = sqlx::query("DELETE FROM sales WHERE employee = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Removes one employee's records for a single month.
    pub async fn delete_by_employee_and_month(
        &self,
        name: &str,
        month: Month,
    ) -> Result<u64, LedgerError> {
        let result = sqlx::query("DELETE FROM sales WHERE employee = ? AND month = ?")
            .bind(name)
            .bind(month.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
