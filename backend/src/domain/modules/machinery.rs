//! Machinery and vehicle screen: asset register, usage, and maintenance.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::machinery::{
    Asset, AssetLog, AssetStatus, MaintenanceTask, NewAsset, NewAssetLog, NewMaintenanceTask,
};
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::MachineryRepository;
use crate::domain::session::Session;

/// Service behind the machinery and vehicle screen.
#[derive(Clone)]
pub struct MachineryService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> MachineryService<R>
where
    R: MachineryRepository,
{
    /// Create a machinery service over the given store.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().naive_local().date()
    }

    /// Register a machine or vehicle.
    pub fn register_asset(&self, session: &Session, asset: NewAsset) -> Result<Asset, ModuleError> {
        authorize(session, Screen::Machinery)?;
        require_text("name", &asset.name)?;
        Ok(self.repo.insert_asset(&asset)?)
    }

    /// The asset register, oldest first.
    pub fn assets(&self, session: &Session) -> Result<Vec<Asset>, ModuleError> {
        authorize(session, Screen::Machinery)?;
        Ok(self.repo.list_assets()?)
    }

    /// Move an asset to a new operational state.
    pub fn set_asset_status(
        &self,
        session: &Session,
        asset_id: i32,
        status: AssetStatus,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::Machinery)?;
        Ok(self.repo.set_asset_status(asset_id, status)?)
    }

    /// Record a day's usage against an asset.
    pub fn log_usage(&self, session: &Session, log: NewAssetLog) -> Result<AssetLog, ModuleError> {
        authorize(session, Screen::Machinery)?;
        if log.hours_used < 0.0 {
            return Err(
                ValidationError::out_of_range("hours_used", "must not be negative").into(),
            );
        }
        if log.fuel_consumed < 0.0 {
            return Err(
                ValidationError::out_of_range("fuel_consumed", "must not be negative").into(),
            );
        }
        Ok(self.repo.insert_usage_log(&log)?)
    }

    /// Usage logs, newest first.
    pub fn usage_logs(&self, session: &Session) -> Result<Vec<AssetLog>, ModuleError> {
        authorize(session, Screen::Machinery)?;
        Ok(self.repo.list_usage_logs()?)
    }

    /// Schedule a maintenance task against an asset.
    pub fn schedule_maintenance(
        &self,
        session: &Session,
        task: NewMaintenanceTask,
    ) -> Result<MaintenanceTask, ModuleError> {
        authorize(session, Screen::Machinery)?;
        require_text("task_name", &task.task_name)?;
        Ok(self.repo.schedule_task(&task)?)
    }

    /// Maintenance tasks, newest first.
    pub fn maintenance_tasks(
        &self,
        session: &Session,
    ) -> Result<Vec<MaintenanceTask>, ModuleError> {
        authorize(session, Screen::Machinery)?;
        Ok(self.repo.list_tasks()?)
    }

    /// Open tasks that have slipped past their planned date.
    pub fn overdue_tasks(&self, session: &Session) -> Result<Vec<MaintenanceTask>, ModuleError> {
        authorize(session, Screen::Machinery)?;
        let today = self.today();
        let tasks = self.repo.list_tasks()?;
        Ok(tasks.into_iter().filter(|t| t.is_overdue(today)).collect())
    }

    /// Complete a task with its actual cost, returning the asset to service.
    pub fn complete_maintenance(
        &self,
        session: &Session,
        task_id: i32,
        cost: f64,
        performed_on: NaiveDate,
    ) -> Result<MaintenanceTask, ModuleError> {
        authorize(session, Screen::Machinery)?;
        if cost < 0.0 {
            return Err(ValidationError::out_of_range("cost", "must not be negative").into());
        }
        Ok(self.repo.complete_task(task_id, cost, performed_on)?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::machinery::MaintenanceStatus;
    use crate::domain::ports::MemoryMachineryRepository;
    use crate::domain::user::Role;
    use crate::test_support::{fixture_clock, fixture_today, session_as};

    #[fixture]
    fn service() -> MachineryService<MemoryMachineryRepository> {
        MachineryService::new(Arc::new(MemoryMachineryRepository::new()), fixture_clock())
    }

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date")
    }

    #[rstest]
    fn usage_negatives_are_rejected(service: MachineryService<MemoryMachineryRepository>) {
        let session = session_as(Role::Owner);
        let asset = service
            .register_asset(&session, NewAsset::new("JCB 3DX"))
            .unwrap();

        let log = NewAssetLog {
            asset_id: asset.id,
            date: day(10),
            hours_used: -1.0,
            fuel_consumed: 0.0,
            notes: None,
        };
        assert!(service.log_usage(&session, log).is_err());
    }

    #[rstest]
    fn scheduling_against_an_unknown_asset_reports_not_found(
        service: MachineryService<MemoryMachineryRepository>,
    ) {
        let session = session_as(Role::Owner);
        let error = service
            .schedule_maintenance(
                &session,
                NewMaintenanceTask {
                    asset_id: 42,
                    task_name: "Oil change".to_owned(),
                    scheduled_date: Some(day(1)),
                    technician: None,
                },
            )
            .unwrap_err();
        assert_eq!(error, ModuleError::not_found("asset", 42));
    }

    #[rstest]
    fn overdue_listing_uses_the_clock(service: MachineryService<MemoryMachineryRepository>) {
        let session = session_as(Role::Owner);
        let asset = service
            .register_asset(&session, NewAsset::new("Tower Crane"))
            .unwrap();
        // Fixture clock sits on 2024-03-15: one slipped task, one future.
        for scheduled in [day(1), day(20)] {
            service
                .schedule_maintenance(
                    &session,
                    NewMaintenanceTask {
                        asset_id: asset.id,
                        task_name: "Inspection".to_owned(),
                        scheduled_date: Some(scheduled),
                        technician: None,
                    },
                )
                .unwrap();
        }

        let overdue = service.overdue_tasks(&session).unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].scheduled_date, Some(day(1)));
        assert!(day(1) < fixture_today());
    }

    #[rstest]
    fn completion_returns_the_asset_to_service(
        service: MachineryService<MemoryMachineryRepository>,
    ) {
        let session = session_as(Role::Owner);
        let asset = service
            .register_asset(&session, NewAsset::new("Concrete Pump"))
            .unwrap();
        service
            .set_asset_status(&session, asset.id, AssetStatus::Maintenance)
            .unwrap();
        let task = service
            .schedule_maintenance(
                &session,
                NewMaintenanceTask {
                    asset_id: asset.id,
                    task_name: "Hose replacement".to_owned(),
                    scheduled_date: Some(day(10)),
                    technician: Some("V. Kumar".to_owned()),
                },
            )
            .unwrap();

        let completed = service
            .complete_maintenance(&session, task.id, 18_500.0, day(14))
            .unwrap();

        assert_eq!(completed.status, MaintenanceStatus::Completed);
        assert_eq!(completed.performed_date, Some(day(14)));
        assert!((completed.cost - 18_500.0).abs() < f64::EPSILON);
        assert_eq!(
            service.assets(&session).unwrap()[0].status,
            AssetStatus::Active
        );
    }

    #[rstest]
    fn negative_completion_costs_are_rejected(
        service: MachineryService<MemoryMachineryRepository>,
    ) {
        let session = session_as(Role::Owner);
        let error = service
            .complete_maintenance(&session, 1, -1.0, day(14))
            .unwrap_err();
        assert!(matches!(error, ModuleError::Validation(_)));
    }

    #[rstest]
    fn directors_are_turned_away(service: MachineryService<MemoryMachineryRepository>) {
        let session = session_as(Role::Director);
        let error = service.assets(&session).unwrap_err();
        assert_eq!(
            error,
            ModuleError::access_denied("Machinery & Vehicle Management")
        );
    }
}
