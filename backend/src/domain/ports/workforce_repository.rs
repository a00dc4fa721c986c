//! Port for employees, payroll, attendance, and training.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;

use super::RepositoryError;
use crate::domain::workforce::{
    AttendanceEntry, AttendanceMark, Employee, NewEmployee, NewTrainingRecord, PayrollEntry,
    PayrollRun, PayrollStatus, TrainingRecord, WorkerUpdate,
};

/// Port for the workforce store shared by the HR, labour, and contractor
/// screens.
///
/// `run_payroll` and `upsert_attendance` are multi-row mutations; adapters
/// run each inside one store transaction.
#[cfg_attr(test, mockall::automock)]
pub trait WorkforceRepository: Send + Sync {
    /// Onboard an employee and return them with their assigned id.
    fn insert_employee(&self, employee: &NewEmployee) -> Result<Employee, RepositoryError>;

    /// Employees oldest first; `active_only` drops deactivated rows.
    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>, RepositoryError>;

    /// Overwrite a worker's master data and return the stored row.
    fn update_worker(
        &self,
        employee_id: i32,
        update: &WorkerUpdate,
    ) -> Result<Employee, RepositoryError>;

    /// Enable or disable an employee.
    fn set_employee_active(&self, employee_id: i32, active: bool)
    -> Result<(), RepositoryError>;

    /// Remove an employee permanently.
    fn delete_employee(&self, employee_id: i32) -> Result<(), RepositoryError>;

    /// Pay every active employee for `month` ("YYYY-MM") in one transaction.
    ///
    /// Employees already paid for the month are skipped. Each written entry
    /// withholds `deduction_rate` of basic salary and lands as Paid.
    fn run_payroll(
        &self,
        month: &str,
        deduction_rate: f64,
    ) -> Result<PayrollRun, RepositoryError>;

    /// Payroll entries for `month`, in write order.
    fn payroll_for_month(&self, month: &str) -> Result<Vec<PayrollEntry>, RepositoryError>;

    /// Apply a batched attendance submission for one day in one transaction.
    ///
    /// Keyed on (employee, date): re-marking an employee updates the
    /// existing row's status and hours instead of inserting a duplicate.
    /// Returns the number of marks applied.
    fn upsert_attendance(
        &self,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<usize, RepositoryError>;

    /// Attendance rows for one day, in employee order.
    fn attendance_on(&self, date: NaiveDate) -> Result<Vec<AttendanceEntry>, RepositoryError>;

    /// Record a completed training against an employee.
    fn record_training(
        &self,
        record: &NewTrainingRecord,
    ) -> Result<TrainingRecord, RepositoryError>;

    /// All training records, newest first.
    fn list_training(&self) -> Result<Vec<TrainingRecord>, RepositoryError>;
}

#[derive(Debug, Default)]
struct WorkforceRows {
    employees: Vec<Employee>,
    payroll: Vec<PayrollEntry>,
    attendance: Vec<AttendanceEntry>,
    training: Vec<TrainingRecord>,
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryWorkforceRepository {
    rows: Mutex<WorkforceRows>,
}

impl MemoryWorkforceRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut WorkforceRows) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl WorkforceRepository for MemoryWorkforceRepository {
    fn insert_employee(&self, employee: &NewEmployee) -> Result<Employee, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.employees.iter().map(|e| e.id).max().unwrap_or(0) + 1;
            let employee = Employee {
                id,
                name: employee.name.clone(),
                role: employee.role.clone(),
                department: employee.department.clone(),
                joining_date: employee.joining_date,
                salary: employee.salary,
                contract_type: employee.contract_type.clone(),
                active: true,
            };
            rows.employees.push(employee.clone());
            employee
        }))
    }

    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            rows.employees
                .iter()
                .filter(|e| !active_only || e.active)
                .cloned()
                .collect()
        }))
    }

    fn update_worker(
        &self,
        employee_id: i32,
        update: &WorkerUpdate,
    ) -> Result<Employee, RepositoryError> {
        self.with_rows(|rows| {
            let employee = rows
                .employees
                .iter_mut()
                .find(|e| e.id == employee_id)
                .ok_or_else(|| RepositoryError::missing("employee", employee_id))?;
            employee.name = update.name.clone();
            employee.role = update.role.clone();
            employee.salary = update.salary;
            employee.active = update.active;
            Ok(employee.clone())
        })
    }

    fn set_employee_active(
        &self,
        employee_id: i32,
        active: bool,
    ) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let employee = rows
                .employees
                .iter_mut()
                .find(|e| e.id == employee_id)
                .ok_or_else(|| RepositoryError::missing("employee", employee_id))?;
            employee.active = active;
            Ok(())
        })
    }

    fn delete_employee(&self, employee_id: i32) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let before = rows.employees.len();
            rows.employees.retain(|e| e.id != employee_id);
            if rows.employees.len() == before {
                return Err(RepositoryError::missing("employee", employee_id));
            }
            Ok(())
        })
    }

    fn run_payroll(
        &self,
        month: &str,
        deduction_rate: f64,
    ) -> Result<PayrollRun, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut processed = 0;
            let mut skipped = 0;
            let active: Vec<Employee> = rows
                .employees
                .iter()
                .filter(|e| e.active)
                .cloned()
                .collect();
            for employee in active {
                let already_paid = rows.payroll.iter().any(|p| {
                    p.employee_id == Some(employee.id)
                        && p.month == month
                        && p.status == PayrollStatus::Paid
                });
                if already_paid {
                    skipped += 1;
                    continue;
                }
                let deductions = employee.salary * deduction_rate;
                let id = rows.payroll.iter().map(|p| p.id).max().unwrap_or(0) + 1;
                rows.payroll.push(PayrollEntry {
                    id,
                    employee_id: Some(employee.id),
                    month: month.to_owned(),
                    basic_salary: Some(employee.salary),
                    deductions,
                    net_salary: Some(employee.salary - deductions),
                    status: PayrollStatus::Paid,
                });
                processed += 1;
            }
            PayrollRun {
                month: month.to_owned(),
                processed,
                skipped,
            }
        }))
    }

    fn payroll_for_month(&self, month: &str) -> Result<Vec<PayrollEntry>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            rows.payroll
                .iter()
                .filter(|p| p.month == month)
                .cloned()
                .collect()
        }))
    }

    fn upsert_attendance(
        &self,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<usize, RepositoryError> {
        self.with_rows(|rows| {
            for mark in marks {
                if !rows.employees.iter().any(|e| e.id == mark.employee_id) {
                    return Err(RepositoryError::missing("employee", mark.employee_id));
                }
                let existing = rows
                    .attendance
                    .iter_mut()
                    .find(|a| a.employee_id == Some(mark.employee_id) && a.date == date);
                match existing {
                    Some(entry) => {
                        entry.status = mark.status;
                        entry.hours_worked = mark.hours_worked;
                    }
                    None => {
                        let id = rows.attendance.iter().map(|a| a.id).max().unwrap_or(0) + 1;
                        rows.attendance.push(AttendanceEntry {
                            id,
                            employee_id: Some(mark.employee_id),
                            date,
                            status: mark.status,
                            hours_worked: mark.hours_worked,
                        });
                    }
                }
            }
            Ok(marks.len())
        })
    }

    fn attendance_on(&self, date: NaiveDate) -> Result<Vec<AttendanceEntry>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut entries: Vec<_> = rows
                .attendance
                .iter()
                .filter(|a| a.date == date)
                .cloned()
                .collect();
            entries.sort_by_key(|a| a.employee_id);
            entries
        }))
    }

    fn record_training(
        &self,
        record: &NewTrainingRecord,
    ) -> Result<TrainingRecord, RepositoryError> {
        self.with_rows(|rows| {
            if !rows.employees.iter().any(|e| e.id == record.employee_id) {
                return Err(RepositoryError::missing("employee", record.employee_id));
            }
            let id = rows.training.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let record = TrainingRecord {
                id,
                employee_id: Some(record.employee_id),
                training_name: Some(record.training_name.clone()),
                date_completed: record.date_completed,
                expiry_date: record.expiry_date,
                score: record.score.clone(),
            };
            rows.training.push(record.clone());
            Ok(record)
        })
    }

    fn list_training(&self) -> Result<Vec<TrainingRecord>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut training = rows.training.clone();
            training.sort_by_key(|t| std::cmp::Reverse(t.id));
            training
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::workforce::{AttendanceStatus, PAYROLL_DEDUCTION_RATE};

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[fixture]
    fn repo() -> MemoryWorkforceRepository {
        let repo = MemoryWorkforceRepository::new();
        let mut mason = NewEmployee::new("R. Patil");
        mason.salary = 24_000.0;
        repo.insert_employee(&mason).unwrap();
        let mut helper = NewEmployee::new("S. Devi");
        helper.salary = 15_000.0;
        repo.insert_employee(&helper).unwrap();
        repo
    }

    #[rstest]
    fn payroll_withholds_the_deduction_rate(repo: MemoryWorkforceRepository) {
        let run = repo.run_payroll("2024-03", PAYROLL_DEDUCTION_RATE).unwrap();
        assert_eq!(run.processed, 2);
        assert_eq!(run.skipped, 0);

        let entries = repo.payroll_for_month("2024-03").unwrap();
        let mason = entries
            .iter()
            .find(|p| p.employee_id == Some(1))
            .unwrap();
        assert!((mason.deductions - 1_200.0).abs() < f64::EPSILON);
        assert_eq!(mason.net_salary, Some(22_800.0));
        assert_eq!(mason.status, PayrollStatus::Paid);
    }

    #[rstest]
    fn rerunning_a_month_skips_paid_employees(repo: MemoryWorkforceRepository) {
        repo.run_payroll("2024-03", PAYROLL_DEDUCTION_RATE).unwrap();
        let rerun = repo.run_payroll("2024-03", PAYROLL_DEDUCTION_RATE).unwrap();

        assert_eq!(rerun.processed, 0);
        assert_eq!(rerun.skipped, 2);
        assert_eq!(repo.payroll_for_month("2024-03").unwrap().len(), 2);
    }

    #[rstest]
    fn deactivated_employees_drop_out_of_the_next_run(repo: MemoryWorkforceRepository) {
        repo.set_employee_active(2, false).unwrap();

        let run = repo.run_payroll("2024-04", PAYROLL_DEDUCTION_RATE).unwrap();
        assert_eq!(run.processed, 1);
        assert_eq!(repo.list_employees(true).unwrap().len(), 1);
    }

    #[rstest]
    fn remarking_attendance_updates_in_place(repo: MemoryWorkforceRepository) {
        let first = [
            AttendanceMark {
                employee_id: 1,
                status: AttendanceStatus::Present,
                hours_worked: 8.0,
            },
            AttendanceMark {
                employee_id: 2,
                status: AttendanceStatus::Absent,
                hours_worked: 0.0,
            },
        ];
        repo.upsert_attendance(day(4), &first).unwrap();

        let correction = [AttendanceMark {
            employee_id: 2,
            status: AttendanceStatus::HalfDay,
            hours_worked: 4.0,
        }];
        repo.upsert_attendance(day(4), &correction).unwrap();

        let entries = repo.attendance_on(day(4)).unwrap();
        assert_eq!(entries.len(), 2);
        let helper = entries
            .iter()
            .find(|a| a.employee_id == Some(2))
            .unwrap();
        assert_eq!(helper.status, AttendanceStatus::HalfDay);
        assert!((helper.hours_worked - 4.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn attendance_is_scoped_to_its_day(repo: MemoryWorkforceRepository) {
        let marks = [AttendanceMark {
            employee_id: 1,
            status: AttendanceStatus::Present,
            hours_worked: 8.0,
        }];
        repo.upsert_attendance(day(4), &marks).unwrap();
        repo.upsert_attendance(day(5), &marks).unwrap();

        assert_eq!(repo.attendance_on(day(4)).unwrap().len(), 1);
        assert_eq!(repo.attendance_on(day(5)).unwrap().len(), 1);
    }

    #[rstest]
    fn training_requires_a_known_employee(repo: MemoryWorkforceRepository) {
        let err = repo
            .record_training(&NewTrainingRecord {
                employee_id: 42,
                training_name: "Working at height".to_owned(),
                date_completed: Some(day(1)),
                expiry_date: None,
                score: Some("Proficient".to_owned()),
            })
            .unwrap_err();
        assert_eq!(err, RepositoryError::missing("employee", 42_i32));
    }
}
