use chrono::NaiveDate;
use sqlx::Row;

use marmor_core::domain::employee::Employee;

use super::RepositoryError;
use crate::DbPool;

/// Employee registry. Name uniqueness is enforced by the UNIQUE column, so
/// concurrent duplicate registrations cannot both land.
pub struct SqlEmployeeRepository {
    pool: DbPool,
}

impl SqlEmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, name: &str, admitted_on: NaiveDate) -> Result<(), RepositoryError> {
        let result = sqlx::query("INSERT INTO employees (name, admitted_on) VALUES (?, ?)")
            .bind(name)
            .bind(admitted_on.to_string())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                let unique_violation = error
                    .as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false);
                if unique_violation {
                    Err(RepositoryError::DuplicateEmployee { name: name.to_string() })
                } else {
                    Err(error.into())
                }
            }
        }
    }

    /// Registered names in stable (alphabetical) order.
    pub async fn list_names(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT name FROM employees ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|row| row.get::<String, _>("name")).collect())
    }

    pub async fn get(&self, name: &str) -> Result<Employee, RepositoryError> {
        let row = sqlx::query("SELECT name, admitted_on FROM employees WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound { name: name.to_string() })?;

        let admitted_raw = row.get::<String, _>("admitted_on");
        let admitted_on = admitted_raw.parse::<NaiveDate>().map_err(|_| {
            RepositoryError::Decode(format!("invalid admission date `{admitted_raw}` for `{name}`"))
        })?;

        Ok(Employee { name: row.get("name"), admitted_on })
    }

    pub async fn get_admission_date(&self, name: &str) -> Result<NaiveDate, RepositoryError> {
        Ok(self.get(name).await?.admitted_on)
    }

    /// Deletes one employee. Unknown names are reported, not ignored.
    pub async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM employees WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { name: name.to_string() });
        }
        Ok(())
    }
}
