//! Port for production logs and their quality checks.

use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::domain::production::{NewProductionLog, NewQualityCheck, ProductionLog, QualityCheck};

/// Port for the plant-output store.
#[cfg_attr(test, mockall::automock)]
pub trait ProductionRepository: Send + Sync {
    /// Record a day's production and return it with its assigned id.
    fn insert_log(&self, log: &NewProductionLog) -> Result<ProductionLog, RepositoryError>;

    /// All production logs, newest first.
    fn list_logs(&self) -> Result<Vec<ProductionLog>, RepositoryError>;

    /// Record a quality check against an existing production log.
    fn insert_check(&self, check: &NewQualityCheck) -> Result<QualityCheck, RepositoryError>;

    /// All quality checks, newest first.
    fn list_checks(&self) -> Result<Vec<QualityCheck>, RepositoryError>;
}

#[derive(Debug, Default)]
struct ProductionRows {
    logs: Vec<ProductionLog>,
    checks: Vec<QualityCheck>,
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryProductionRepository {
    rows: Mutex<ProductionRows>,
}

impl MemoryProductionRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut ProductionRows) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl ProductionRepository for MemoryProductionRepository {
    fn insert_log(&self, log: &NewProductionLog) -> Result<ProductionLog, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.logs.iter().map(|l| l.id).max().unwrap_or(0) + 1;
            let log = ProductionLog {
                id,
                date: log.date,
                project_id: log.project_id,
                quantity_produced: log.quantity_produced,
                efficiency: log.efficiency,
                waste_generated: log.waste_generated,
                notes: log.notes.clone(),
            };
            rows.logs.push(log.clone());
            log
        }))
    }

    fn list_logs(&self) -> Result<Vec<ProductionLog>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut logs = rows.logs.clone();
            logs.sort_by_key(|l| std::cmp::Reverse(l.id));
            logs
        }))
    }

    fn insert_check(&self, check: &NewQualityCheck) -> Result<QualityCheck, RepositoryError> {
        self.with_rows(|rows| {
            if let Some(production_id) = check.production_id {
                if !rows.logs.iter().any(|l| l.id == production_id) {
                    return Err(RepositoryError::missing("production log", production_id));
                }
            }
            let id = rows.checks.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let check = QualityCheck {
                id,
                date: check.date,
                production_id: check.production_id,
                parameter: check.parameter.clone(),
                result: Some(check.result),
                remarks: check.remarks.clone(),
            };
            rows.checks.push(check.clone());
            Ok(check)
        })
    }

    fn list_checks(&self) -> Result<Vec<QualityCheck>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut checks = rows.checks.clone();
            checks.sort_by_key(|c| std::cmp::Reverse(c.id));
            checks
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;
    use crate::domain::production::QualityResult;

    fn log_on(day: u32) -> NewProductionLog {
        NewProductionLog {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            project_id: None,
            quantity_produced: 120.0,
            efficiency: Some(85.0),
            waste_generated: 4.0,
            notes: None,
        }
    }

    #[rstest]
    fn checks_must_reference_a_recorded_log() {
        let repo = MemoryProductionRepository::new();
        let log = repo.insert_log(&log_on(2)).unwrap();

        let check = repo
            .insert_check(&NewQualityCheck {
                date: log.date,
                production_id: Some(log.id),
                parameter: Some("Cube strength".to_owned()),
                result: QualityResult::Pass,
                remarks: None,
            })
            .unwrap();
        assert_eq!(check.result, Some(QualityResult::Pass));

        let err = repo
            .insert_check(&NewQualityCheck {
                date: log.date,
                production_id: Some(99),
                parameter: None,
                result: QualityResult::Fail,
                remarks: None,
            })
            .unwrap_err();
        assert_eq!(err, RepositoryError::missing("production log", 99_i32));
    }

    #[rstest]
    fn logs_list_newest_first() {
        let repo = MemoryProductionRepository::new();
        repo.insert_log(&log_on(2)).unwrap();
        repo.insert_log(&log_on(3)).unwrap();

        let logs = repo.list_logs().unwrap();
        assert_eq!(logs[0].date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
    }
}
