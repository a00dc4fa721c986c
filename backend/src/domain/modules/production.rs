//! Plant and production screen: output logs and quality checks.

use std::sync::Arc;

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::menu::Screen;
use crate::domain::modules::authorize;
use crate::domain::ports::ProductionRepository;
use crate::domain::production::{NewProductionLog, NewQualityCheck, ProductionLog, QualityCheck};
use crate::domain::session::Session;

/// Service behind the plant and production screen.
#[derive(Clone)]
pub struct ProductionService<R> {
    repo: Arc<R>,
}

impl<R> ProductionService<R>
where
    R: ProductionRepository,
{
    /// Create a production service over the given store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Record a day's output.
    pub fn record_output(
        &self,
        session: &Session,
        log: NewProductionLog,
    ) -> Result<ProductionLog, ModuleError> {
        authorize(session, Screen::Production)?;
        if log.quantity_produced < 0.0 {
            return Err(
                ValidationError::out_of_range("quantity_produced", "must not be negative").into(),
            );
        }
        if let Some(efficiency) = log.efficiency {
            if !(0.0..=100.0).contains(&efficiency) {
                return Err(ValidationError::out_of_range(
                    "efficiency",
                    "must be between 0 and 100",
                )
                .into());
            }
        }
        Ok(self.repo.insert_log(&log)?)
    }

    /// Output logs, newest first.
    pub fn output_logs(&self, session: &Session) -> Result<Vec<ProductionLog>, ModuleError> {
        authorize(session, Screen::Production)?;
        Ok(self.repo.list_logs()?)
    }

    /// Record a quality check, optionally against an output log.
    pub fn record_check(
        &self,
        session: &Session,
        check: NewQualityCheck,
    ) -> Result<QualityCheck, ModuleError> {
        authorize(session, Screen::Production)?;
        Ok(self.repo.insert_check(&check)?)
    }

    /// Quality checks, newest first.
    pub fn checks(&self, session: &Session) -> Result<Vec<QualityCheck>, ModuleError> {
        authorize(session, Screen::Production)?;
        Ok(self.repo.list_checks()?)
    }
}
