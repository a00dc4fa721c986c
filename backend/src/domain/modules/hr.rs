//! HR and payroll screen: onboarding, payroll runs, training, attendance.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::WorkforceRepository;
use crate::domain::session::Session;
use crate::domain::workforce::{
    AttendanceEntry, AttendanceMark, Employee, NewEmployee, NewTrainingRecord,
    PAYROLL_DEDUCTION_RATE, PayrollEntry, PayrollRun, TrainingRecord,
};

/// Reject anything that is not a calendar month written as "YYYY-MM".
fn check_month(month: &str) -> Result<(), ModuleError> {
    let first_day = format!("{month}-01");
    if NaiveDate::parse_from_str(&first_day, "%Y-%m-%d").is_err() || month.len() != 7 {
        return Err(ValidationError::out_of_range("month", "must be formatted YYYY-MM").into());
    }
    Ok(())
}

/// Service behind the HR and payroll screen.
#[derive(Clone)]
pub struct HrService<R> {
    repo: Arc<R>,
}

impl<R> HrService<R>
where
    R: WorkforceRepository,
{
    /// Create an HR service over the workforce store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Onboard a staff member.
    pub fn onboard(&self, session: &Session, employee: NewEmployee) -> Result<Employee, ModuleError> {
        authorize(session, Screen::HumanResources)?;
        require_text("name", &employee.name)?;
        if employee.salary < 0.0 {
            return Err(ValidationError::out_of_range("salary", "must not be negative").into());
        }
        Ok(self.repo.insert_employee(&employee)?)
    }

    /// The full workforce directory, deactivated staff included.
    pub fn directory(&self, session: &Session) -> Result<Vec<Employee>, ModuleError> {
        authorize(session, Screen::HumanResources)?;
        Ok(self.repo.list_employees(false)?)
    }

    /// Enable or disable a staff profile.
    pub fn set_active(
        &self,
        session: &Session,
        employee_id: i32,
        active: bool,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::HumanResources)?;
        Ok(self.repo.set_employee_active(employee_id, active)?)
    }

    /// Pay every active employee for a "YYYY-MM" month in one transaction.
    ///
    /// Employees already paid for the month are skipped, so a rerun is safe.
    pub fn run_payroll(&self, session: &Session, month: &str) -> Result<PayrollRun, ModuleError> {
        authorize(session, Screen::HumanResources)?;
        check_month(month)?;
        Ok(self.repo.run_payroll(month, PAYROLL_DEDUCTION_RATE)?)
    }

    /// Payroll entries for a month, in write order.
    pub fn payroll(&self, session: &Session, month: &str) -> Result<Vec<PayrollEntry>, ModuleError> {
        authorize(session, Screen::HumanResources)?;
        check_month(month)?;
        Ok(self.repo.payroll_for_month(month)?)
    }

    /// Record a completed training against an employee.
    pub fn record_training(
        &self,
        session: &Session,
        record: NewTrainingRecord,
    ) -> Result<TrainingRecord, ModuleError> {
        authorize(session, Screen::HumanResources)?;
        require_text("training_name", &record.training_name)?;
        Ok(self.repo.record_training(&record)?)
    }

    /// Training records, newest first.
    pub fn training(&self, session: &Session) -> Result<Vec<TrainingRecord>, ModuleError> {
        authorize(session, Screen::HumanResources)?;
        Ok(self.repo.list_training()?)
    }

    /// Apply a batched attendance submission for one day.
    pub fn mark_attendance(
        &self,
        session: &Session,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<usize, ModuleError> {
        authorize(session, Screen::HumanResources)?;
        Ok(self.repo.upsert_attendance(date, marks)?)
    }

    /// Attendance rows for one day, in employee order.
    pub fn attendance(
        &self,
        session: &Session,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceEntry>, ModuleError> {
        authorize(session, Screen::HumanResources)?;
        Ok(self.repo.attendance_on(date)?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MemoryWorkforceRepository;
    use crate::domain::user::Role;
    use crate::domain::workforce::PayrollStatus;
    use crate::test_support::session_as;

    #[fixture]
    fn service() -> HrService<MemoryWorkforceRepository> {
        HrService::new(Arc::new(MemoryWorkforceRepository::new()))
    }

    fn engineer(salary: f64) -> NewEmployee {
        let mut employee = NewEmployee::new("A. Sharma");
        employee.role = Some("Engineer".to_owned());
        employee.salary = salary;
        employee
    }

    #[rstest]
    fn onboarding_rejects_negative_salaries(service: HrService<MemoryWorkforceRepository>) {
        let session = session_as(Role::AccountingStaff);
        assert!(service.onboard(&session, engineer(-1.0)).is_err());
    }

    #[rstest]
    fn the_directory_keeps_deactivated_staff_visible(
        service: HrService<MemoryWorkforceRepository>,
    ) {
        let session = session_as(Role::AccountingStaff);
        let stored = service.onboard(&session, engineer(30_000.0)).unwrap();
        service.set_active(&session, stored.id, false).unwrap();

        let directory = service.directory(&session).unwrap();
        assert_eq!(directory.len(), 1);
        assert!(!directory[0].active);
    }

    #[rstest]
    #[case("2024-3")]
    #[case("March 2024")]
    #[case("2024-13")]
    fn malformed_months_are_rejected(
        service: HrService<MemoryWorkforceRepository>,
        #[case] month: &str,
    ) {
        let session = session_as(Role::AccountingStaff);
        let error = service.run_payroll(&session, month).unwrap_err();
        assert!(matches!(error, ModuleError::Validation(_)));
    }

    #[rstest]
    fn payroll_withholds_and_reruns_skip(service: HrService<MemoryWorkforceRepository>) {
        let session = session_as(Role::AccountingStaff);
        service.onboard(&session, engineer(24_000.0)).unwrap();

        let run = service.run_payroll(&session, "2024-03").unwrap();
        assert_eq!(run.processed, 1);

        let entries = service.payroll(&session, "2024-03").unwrap();
        assert!((entries[0].deductions - 1_200.0).abs() < f64::EPSILON);
        assert_eq!(entries[0].net_salary, Some(22_800.0));
        assert_eq!(entries[0].status, PayrollStatus::Paid);

        let rerun = service.run_payroll(&session, "2024-03").unwrap();
        assert_eq!(rerun.processed, 0);
        assert_eq!(rerun.skipped, 1);
    }

    #[rstest]
    fn training_requires_a_known_employee(service: HrService<MemoryWorkforceRepository>) {
        let session = session_as(Role::Owner);
        let error = service
            .record_training(
                &session,
                NewTrainingRecord {
                    employee_id: 42,
                    training_name: "Working at height".to_owned(),
                    date_completed: None,
                    expiry_date: None,
                    score: None,
                },
            )
            .unwrap_err();
        assert_eq!(error, ModuleError::not_found("employee", 42));
    }

    #[rstest]
    fn attendance_round_trips_through_the_screen(service: HrService<MemoryWorkforceRepository>) {
        use crate::domain::workforce::AttendanceStatus;

        let session = session_as(Role::AccountingStaff);
        let stored = service.onboard(&session, engineer(24_000.0)).unwrap();
        let date = "2024-03-04".parse().expect("valid date");

        let marks = [AttendanceMark {
            employee_id: stored.id,
            status: AttendanceStatus::Present,
            hours_worked: 8.0,
        }];
        assert_eq!(service.mark_attendance(&session, date, &marks).unwrap(), 1);
        assert_eq!(service.attendance(&session, date).unwrap().len(), 1);
    }

    #[rstest]
    fn directors_are_turned_away(service: HrService<MemoryWorkforceRepository>) {
        let session = session_as(Role::Director);
        let error = service.directory(&session).unwrap_err();
        assert_eq!(error, ModuleError::access_denied("HR & Payroll"));
    }
}
