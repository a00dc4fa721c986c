//! Labour and contractor consoles over the shared workforce store.
//!
//! Both screens manage the same employee table; what differs is the gate and
//! the contract type stamped at registration. The labour console always
//! registers under the fixed Labour type, while the contractor console
//! records the chosen engagement terms.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::WorkforceRepository;
use crate::domain::session::Session;
use crate::domain::workforce::{
    AttendanceEntry, AttendanceMark, Employee, EngagementTerms, LABOUR_CONTRACT_TYPE, NewEmployee,
    WorkerUpdate,
};

/// Registration input shared by both consoles.
#[derive(Debug, Clone, PartialEq)]
pub struct Recruit {
    /// Full name (required).
    pub name: String,
    /// Trade or designation, e.g. "Mason".
    pub role: Option<String>,
    /// Daily wage or agreed rate.
    pub wage: f64,
    /// Joined on.
    pub joining_date: Option<NaiveDate>,
    /// Engagement terms. Only the contractor console honours this; the
    /// labour console overrides it with the fixed Labour type.
    pub terms: Option<EngagementTerms>,
}

impl Recruit {
    /// An unpaid recruit with only the name filled in.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            wage: 0.0,
            joining_date: None,
            terms: None,
        }
    }
}

/// Service behind the labour and contractor consoles.
#[derive(Clone)]
pub struct WorkforceService<R> {
    repo: Arc<R>,
    console: Screen,
}

impl<R> WorkforceService<R>
where
    R: WorkforceRepository,
{
    /// The labour management console.
    pub fn labour(repo: Arc<R>) -> Self {
        Self {
            repo,
            console: Screen::Labour,
        }
    }

    /// The contractor management console.
    pub fn contractors(repo: Arc<R>) -> Self {
        Self {
            repo,
            console: Screen::Contractors,
        }
    }

    fn contract_type(&self, terms: Option<EngagementTerms>) -> String {
        if self.console == Screen::Labour {
            LABOUR_CONTRACT_TYPE.to_owned()
        } else {
            terms.unwrap_or(EngagementTerms::Contract).as_str().to_owned()
        }
    }

    /// Register a worker through this console.
    pub fn register(&self, session: &Session, recruit: Recruit) -> Result<Employee, ModuleError> {
        authorize(session, self.console)?;
        require_text("name", &recruit.name)?;
        if recruit.wage < 0.0 {
            return Err(ValidationError::out_of_range("wage", "must not be negative").into());
        }
        let employee = NewEmployee {
            name: recruit.name,
            role: recruit.role,
            department: None,
            joining_date: recruit.joining_date,
            salary: recruit.wage,
            contract_type: Some(self.contract_type(recruit.terms)),
        };
        Ok(self.repo.insert_employee(&employee)?)
    }

    /// Active workers, as shown by the directory and attendance tabs.
    pub fn directory(&self, session: &Session) -> Result<Vec<Employee>, ModuleError> {
        authorize(session, self.console)?;
        Ok(self.repo.list_employees(true)?)
    }

    /// Every worker regardless of state, as shown by the management tab.
    pub fn roster(&self, session: &Session) -> Result<Vec<Employee>, ModuleError> {
        authorize(session, self.console)?;
        Ok(self.repo.list_employees(false)?)
    }

    /// Apply a batched attendance submission for one day.
    ///
    /// Keyed on (worker, date): re-marking a worker corrects the existing
    /// row instead of inserting a duplicate.
    pub fn mark_attendance(
        &self,
        session: &Session,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<usize, ModuleError> {
        authorize(session, self.console)?;
        Ok(self.repo.upsert_attendance(date, marks)?)
    }

    /// Attendance rows for one day, in worker order.
    pub fn attendance(
        &self,
        session: &Session,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceEntry>, ModuleError> {
        authorize(session, self.console)?;
        Ok(self.repo.attendance_on(date)?)
    }

    /// Overwrite a worker's master data and return the stored row.
    pub fn update_worker(
        &self,
        session: &Session,
        employee_id: i32,
        update: WorkerUpdate,
    ) -> Result<Employee, ModuleError> {
        authorize(session, self.console)?;
        require_text("name", &update.name)?;
        if update.salary < 0.0 {
            return Err(ValidationError::out_of_range("salary", "must not be negative").into());
        }
        Ok(self.repo.update_worker(employee_id, &update)?)
    }

    /// Remove a worker permanently.
    pub fn remove_worker(&self, session: &Session, employee_id: i32) -> Result<(), ModuleError> {
        authorize(session, self.console)?;
        Ok(self.repo.delete_employee(employee_id)?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MemoryWorkforceRepository;
    use crate::domain::user::Role;
    use crate::domain::workforce::AttendanceStatus;
    use crate::test_support::session_as;

    #[fixture]
    fn store() -> Arc<MemoryWorkforceRepository> {
        Arc::new(MemoryWorkforceRepository::new())
    }

    #[rstest]
    fn the_labour_console_always_stamps_labour(store: Arc<MemoryWorkforceRepository>) {
        let service = WorkforceService::labour(store);
        let session = session_as(Role::Owner);

        let mut recruit = Recruit::new("R. Patil");
        recruit.terms = Some(EngagementTerms::Permanent);
        let stored = service.register(&session, recruit).unwrap();

        assert_eq!(stored.contract_type.as_deref(), Some("Labour"));
    }

    #[rstest]
    fn the_contractor_console_records_the_chosen_terms(store: Arc<MemoryWorkforceRepository>) {
        let service = WorkforceService::contractors(store);
        let session = session_as(Role::Owner);

        let mut recruit = Recruit::new("S. Devi");
        recruit.terms = Some(EngagementTerms::DailyWage);
        let chosen = service.register(&session, recruit).unwrap();
        assert_eq!(chosen.contract_type.as_deref(), Some("Daily Wage"));

        let defaulted = service.register(&session, Recruit::new("M. Khan")).unwrap();
        assert_eq!(defaulted.contract_type.as_deref(), Some("Contract"));
    }

    #[rstest]
    fn both_consoles_share_one_directory(store: Arc<MemoryWorkforceRepository>) {
        let labour = WorkforceService::labour(store.clone());
        let contractors = WorkforceService::contractors(store);
        let session = session_as(Role::Owner);

        labour.register(&session, Recruit::new("R. Patil")).unwrap();
        contractors
            .register(&session, Recruit::new("S. Devi"))
            .unwrap();

        assert_eq!(labour.directory(&session).unwrap().len(), 2);
        assert_eq!(contractors.directory(&session).unwrap().len(), 2);
    }

    #[rstest]
    fn negative_wages_are_rejected(store: Arc<MemoryWorkforceRepository>) {
        let service = WorkforceService::labour(store);
        let session = session_as(Role::Owner);

        let mut recruit = Recruit::new("R. Patil");
        recruit.wage = -10.0;
        assert!(service.register(&session, recruit).is_err());
    }

    #[rstest]
    fn remarking_a_day_corrects_in_place(store: Arc<MemoryWorkforceRepository>) {
        let service = WorkforceService::labour(store);
        let session = session_as(Role::Owner);
        let worker = service.register(&session, Recruit::new("R. Patil")).unwrap();
        let date = "2024-03-04".parse().expect("valid date");

        service
            .mark_attendance(
                &session,
                date,
                &[AttendanceMark {
                    employee_id: worker.id,
                    status: AttendanceStatus::Absent,
                    hours_worked: 0.0,
                }],
            )
            .unwrap();
        service
            .mark_attendance(
                &session,
                date,
                &[AttendanceMark {
                    employee_id: worker.id,
                    status: AttendanceStatus::HalfDay,
                    hours_worked: 4.0,
                }],
            )
            .unwrap();

        let entries = service.attendance(&session, date).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, AttendanceStatus::HalfDay);
    }

    #[rstest]
    fn deactivated_workers_stay_on_the_roster_only(store: Arc<MemoryWorkforceRepository>) {
        let service = WorkforceService::contractors(store);
        let session = session_as(Role::Owner);
        let worker = service.register(&session, Recruit::new("S. Devi")).unwrap();

        service
            .update_worker(
                &session,
                worker.id,
                WorkerUpdate {
                    name: worker.name.clone(),
                    role: worker.role.clone(),
                    salary: worker.salary,
                    active: false,
                },
            )
            .unwrap();

        assert!(service.directory(&session).unwrap().is_empty());
        assert_eq!(service.roster(&session).unwrap().len(), 1);
    }

    #[rstest]
    fn removing_an_unknown_worker_reports_not_found(store: Arc<MemoryWorkforceRepository>) {
        let service = WorkforceService::labour(store);
        let session = session_as(Role::Owner);
        let error = service.remove_worker(&session, 42).unwrap_err();
        assert_eq!(error, ModuleError::not_found("employee", 42));
    }

    #[rstest]
    fn only_owners_reach_the_consoles(store: Arc<MemoryWorkforceRepository>) {
        let labour = WorkforceService::labour(store.clone());
        let contractors = WorkforceService::contractors(store);

        let director = session_as(Role::Director);
        assert_eq!(
            labour.directory(&director).unwrap_err(),
            ModuleError::access_denied("Labour Management")
        );
        assert_eq!(
            contractors.directory(&director).unwrap_err(),
            ModuleError::access_denied("Contractor Management")
        );
    }
}
