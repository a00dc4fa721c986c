//! Database-backed `ProductionRepository` implementation using Diesel.

use diesel::prelude::*;

use crate::domain::ports::{ProductionRepository, RepositoryError};
use crate::domain::production::{
    NewProductionLog, NewQualityCheck, ProductionLog, QualityCheck,
};

use super::diesel_helpers::{
    last_insert_id, map_diesel_error, map_pool_error, parse_optional_label,
};
use super::models::{
    NewProductionLogRow, NewQualityCheckRow, ProductionLogRow, QualityCheckRow,
};
use super::pool::DbPool;
use super::schema::{production_logs, quality_checks};

/// Diesel-backed implementation of the production ledger port.
#[derive(Clone)]
pub struct DieselProductionRepository {
    pool: DbPool,
}

impl DieselProductionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_log(row: ProductionLogRow) -> ProductionLog {
    ProductionLog {
        id: row.id,
        date: row.date,
        project_id: row.project_id,
        quantity_produced: row.quantity_produced,
        efficiency: row.efficiency,
        waste_generated: row.waste_generated,
        notes: row.notes,
    }
}

fn row_to_check(row: QualityCheckRow) -> Result<QualityCheck, RepositoryError> {
    Ok(QualityCheck {
        id: row.id,
        date: row.date,
        production_id: row.production_id,
        parameter: row.parameter,
        result: parse_optional_label(row.result.as_deref())?,
        remarks: row.remarks,
    })
}

impl ProductionRepository for DieselProductionRepository {
    fn insert_log(&self, log: &NewProductionLog) -> Result<ProductionLog, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewProductionLogRow {
                    date: log.date,
                    project_id: log.project_id,
                    quantity_produced: log.quantity_produced,
                    efficiency: log.efficiency,
                    waste_generated: log.waste_generated,
                    notes: log.notes.as_deref(),
                };
                diesel::insert_into(production_logs::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                production_logs::table
                    .find(id)
                    .select(ProductionLogRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_log(row))
    }

    fn list_logs(&self) -> Result<Vec<ProductionLog>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<ProductionLogRow> = production_logs::table
            .order(production_logs::id.desc())
            .select(ProductionLogRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_log).collect())
    }

    fn insert_check(&self, check: &NewQualityCheck) -> Result<QualityCheck, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if let Some(production_id) = check.production_id {
            let found: Option<i32> = production_logs::table
                .find(production_id)
                .select(production_logs::id)
                .first(&mut conn)
                .optional()
                .map_err(map_diesel_error)?;
            if found.is_none() {
                return Err(RepositoryError::missing("production log", production_id));
            }
        }
        let row = conn
            .transaction(|conn| {
                let new_row = NewQualityCheckRow {
                    date: check.date,
                    production_id: check.production_id,
                    parameter: check.parameter.as_deref(),
                    result: Some(check.result.as_str()),
                    remarks: check.remarks.as_deref(),
                };
                diesel::insert_into(quality_checks::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                quality_checks::table
                    .find(id)
                    .select(QualityCheckRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_check(row)
    }

    fn list_checks(&self) -> Result<Vec<QualityCheck>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<QualityCheckRow> = quality_checks::table
            .order(quality_checks::id.desc())
            .select(QualityCheckRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_check).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.

    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;
    use crate::domain::production::QualityResult;

    #[rstest]
    fn log_rows_convert_to_domain_logs() {
        let row = ProductionLogRow {
            id: 4,
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            project_id: Some(2),
            quantity_produced: 180.0,
            efficiency: Some(92.5),
            waste_generated: 4.0,
            notes: Some("Night shift pour".into()),
        };

        let log = row_to_log(row);
        assert_eq!(log.id, 4);
        assert_eq!(log.efficiency, Some(92.5));
    }

    #[rstest]
    fn check_rows_decode_their_result() {
        let row = QualityCheckRow {
            id: 7,
            date: NaiveDate::from_ymd_opt(2024, 5, 21).unwrap(),
            production_id: Some(4),
            parameter: Some("Slump".into()),
            result: Some("Fail".into()),
            remarks: None,
        };

        let check = row_to_check(row).unwrap();
        assert_eq!(check.result, Some(QualityResult::Fail));
    }

    #[rstest]
    fn unknown_check_results_are_reported() {
        let row = QualityCheckRow {
            id: 8,
            date: NaiveDate::from_ymd_opt(2024, 5, 21).unwrap(),
            production_id: None,
            parameter: None,
            result: Some("Inconclusive".into()),
            remarks: None,
        };

        let error = row_to_check(row).unwrap_err();
        assert_eq!(
            error,
            RepositoryError::query("unknown quality result: Inconclusive")
        );
    }
}
