use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use marmor_core::domain::month::Month;
use marmor_core::domain::sale::{Path, SaleRecord};

use super::RepositoryError;
use crate::DbPool;

const SELECT_COLUMNS: &str = "SELECT
    id,
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
 FROM sales";

pub struct SqlSaleRepository {
    pool: DbPool,
}

impl SqlSaleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn query_all(&self) -> Result<Vec<SaleRecord>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(sale_from_row).collect()
    }

    pub async fn query_by_month(&self, month: Month) -> Result<Vec<SaleRecord>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} WHERE month = ? ORDER BY id ASC"))
            .bind(month.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(sale_from_row).collect()
    }

    pub async fn query_by_employee(&self, name: &str) -> Result<Vec<SaleRecord>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} WHERE employee = ? ORDER BY id ASC"))
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(sale_from_row).collect()
    }
}

fn decimal_column(row: &SqliteRow, column: &'static str) -> Result<Decimal, RepositoryError> {
    let raw = row.get::<String, _>(column);
    raw.parse::<Decimal>()
        .map_err(|_| RepositoryError::Decode(format!("invalid decimal `{raw}` in column {column}")))
}

pub(crate) fn sale_from_row(row: SqliteRow) -> Result<SaleRecord, RepositoryError> {
    let month_raw = row.get::<String, _>("month");
    let month = month_raw
        .parse::<Month>()
        .map_err(|_| RepositoryError::Decode(format!("invalid month label `{month_raw}`")))?;

    let path_raw = row.get::<String, _>("path");
    let path = path_raw
        .parse::<Path>()
        .map_err(|_| RepositoryError::Decode(format!("invalid path label `{path_raw}`")))?;

    Ok(SaleRecord {
        id: row.get::<i64, _>("id"),
        employee: row.get("employee"),
        month,
        rochas: decimal_column(&row, "rochas")?,
        decorativos: decimal_column(&row, "decorativos")?,
        itens: decimal_column(&row, "itens")?,
        total: decimal_column(&row, "total")?,
        path,
        commission: decimal_column(&row, "commission")?,
        loyalty_bonus: decimal_column(&row, "loyalty_bonus")?,
        forge_bonus: decimal_column(&row, "forge_bonus")?,
    })
}
