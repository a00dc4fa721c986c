//! Database-backed `WorkforceRepository` implementation using Diesel.
//!
//! Payroll runs and batched attendance both span multiple rows; each runs
//! inside one transaction so a mid-batch failure leaves nothing behind.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::ports::{RepositoryError, WorkforceRepository};
use crate::domain::workforce::{
    AttendanceEntry, AttendanceMark, Employee, NewEmployee, NewTrainingRecord, PayrollEntry,
    PayrollRun, PayrollStatus, TrainingRecord, WorkerUpdate,
};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error, parse_label};
use super::models::{
    AttendanceRow, EmployeeRow, NewAttendanceRow, NewEmployeeRow, NewPayrollRow,
    NewTrainingRecordRow, PayrollRow, TrainingRecordRow,
};
use super::pool::DbPool;
use super::schema::{attendance, employees, payroll, training_records};

/// Diesel-backed implementation of the workforce port.
#[derive(Clone)]
pub struct DieselWorkforceRepository {
    pool: DbPool,
}

impl DieselWorkforceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Error carried out of the attendance transaction; a missing employee must
/// roll back every mark already written in the batch.
enum MarkError {
    MissingEmployee(i32),
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for MarkError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn row_to_employee(row: EmployeeRow) -> Employee {
    Employee {
        id: row.id,
        name: row.name,
        role: row.role,
        department: row.department,
        joining_date: row.joining_date,
        salary: row.salary,
        contract_type: row.contract_type,
        active: row.is_active,
    }
}

fn row_to_payroll_entry(row: PayrollRow) -> Result<PayrollEntry, RepositoryError> {
    Ok(PayrollEntry {
        id: row.id,
        employee_id: row.employee_id,
        month: row.month,
        basic_salary: row.basic_salary,
        deductions: row.deductions,
        net_salary: row.net_salary,
        status: parse_label(&row.status)?,
    })
}

fn row_to_attendance_entry(row: AttendanceRow) -> Result<AttendanceEntry, RepositoryError> {
    Ok(AttendanceEntry {
        id: row.id,
        employee_id: row.employee_id,
        date: row.date,
        status: parse_label(&row.status)?,
        hours_worked: row.hours_worked,
    })
}

fn row_to_training_record(row: TrainingRecordRow) -> TrainingRecord {
    TrainingRecord {
        id: row.id,
        employee_id: row.employee_id,
        training_name: row.training_name,
        date_completed: row.date_completed,
        expiry_date: row.expiry_date,
        score: row.score,
    }
}

fn employee_exists(conn: &mut super::pool::AnyConnection, employee_id: i32) -> QueryResult<bool> {
    let found: Option<i32> = employees::table
        .find(employee_id)
        .select(employees::id)
        .first(conn)
        .optional()?;
    Ok(found.is_some())
}

impl WorkforceRepository for DieselWorkforceRepository {
    fn insert_employee(&self, employee: &NewEmployee) -> Result<Employee, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewEmployeeRow {
                    name: &employee.name,
                    role: employee.role.as_deref(),
                    department: employee.department.as_deref(),
                    joining_date: employee.joining_date,
                    salary: employee.salary,
                    contract_type: employee.contract_type.as_deref(),
                    is_active: true,
                };
                diesel::insert_into(employees::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                employees::table
                    .find(id)
                    .select(EmployeeRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_employee(row))
    }

    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let mut statement = employees::table.into_boxed();
        if active_only {
            statement = statement.filter(employees::is_active.eq(true));
        }
        let rows: Vec<EmployeeRow> = statement
            .order(employees::id.asc())
            .select(EmployeeRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_employee).collect())
    }

    fn update_worker(
        &self,
        employee_id: i32,
        update: &WorkerUpdate,
    ) -> Result<Employee, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        // Overwrite semantics: a None role clears the stored column.
        let affected = diesel::update(employees::table.find(employee_id))
            .set((
                employees::name.eq(&update.name),
                employees::role.eq(update.role.as_deref()),
                employees::salary.eq(update.salary),
                employees::is_active.eq(update.active),
            ))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("employee", employee_id));
        }
        let row = employees::table
            .find(employee_id)
            .select(EmployeeRow::as_select())
            .first::<EmployeeRow>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| RepositoryError::missing("employee", employee_id))?;
        Ok(row_to_employee(row))
    }

    fn set_employee_active(
        &self,
        employee_id: i32,
        active: bool,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(employees::table.find(employee_id))
            .set(employees::is_active.eq(active))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("employee", employee_id));
        }
        Ok(())
    }

    fn delete_employee(&self, employee_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::delete(employees::table.find(employee_id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("employee", employee_id));
        }
        Ok(())
    }

    fn run_payroll(
        &self,
        month: &str,
        deduction_rate: f64,
    ) -> Result<PayrollRun, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        conn.transaction(|conn| {
            let active: Vec<(i32, f64)> = employees::table
                .filter(employees::is_active.eq(true))
                .order(employees::id.asc())
                .select((employees::id, employees::salary))
                .load(conn)?;
            let paid: Vec<Option<i32>> = payroll::table
                .filter(
                    payroll::month
                        .eq(month)
                        .and(payroll::status.eq(PayrollStatus::Paid.as_str())),
                )
                .select(payroll::employee_id)
                .load(conn)?;
            let mut processed = 0;
            let mut skipped = 0;
            for (employee_id, salary) in active {
                if paid.contains(&Some(employee_id)) {
                    skipped += 1;
                    continue;
                }
                let deductions = salary * deduction_rate;
                let entry = NewPayrollRow {
                    employee_id: Some(employee_id),
                    month,
                    basic_salary: Some(salary),
                    deductions,
                    net_salary: Some(salary - deductions),
                    status: PayrollStatus::Paid.as_str(),
                };
                diesel::insert_into(payroll::table)
                    .values(&entry)
                    .execute(conn)?;
                processed += 1;
            }
            Ok(PayrollRun {
                month: month.to_owned(),
                processed,
                skipped,
            })
        })
        .map_err(map_diesel_error)
    }

    fn payroll_for_month(&self, month: &str) -> Result<Vec<PayrollEntry>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<PayrollRow> = payroll::table
            .filter(payroll::month.eq(month))
            .order(payroll::id.asc())
            .select(PayrollRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_payroll_entry).collect()
    }

    fn upsert_attendance(
        &self,
        date: NaiveDate,
        marks: &[AttendanceMark],
    ) -> Result<usize, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        conn.transaction(|conn| {
            for mark in marks {
                if !employee_exists(conn, mark.employee_id)? {
                    return Err(MarkError::MissingEmployee(mark.employee_id));
                }
                let existing: Option<i32> = attendance::table
                    .filter(
                        attendance::employee_id
                            .eq(mark.employee_id)
                            .and(attendance::date.eq(date)),
                    )
                    .select(attendance::id)
                    .first(conn)
                    .optional()?;
                match existing {
                    Some(id) => {
                        diesel::update(attendance::table.find(id))
                            .set((
                                attendance::status.eq(mark.status.as_str()),
                                attendance::hours_worked.eq(mark.hours_worked),
                            ))
                            .execute(conn)?;
                    }
                    None => {
                        let new_row = NewAttendanceRow {
                            employee_id: Some(mark.employee_id),
                            date,
                            status: mark.status.as_str(),
                            hours_worked: mark.hours_worked,
                        };
                        diesel::insert_into(attendance::table)
                            .values(&new_row)
                            .execute(conn)?;
                    }
                }
            }
            Ok(marks.len())
        })
        .map_err(|error| match error {
            MarkError::MissingEmployee(id) => RepositoryError::missing("employee", id),
            MarkError::Diesel(error) => map_diesel_error(error),
        })
    }

    fn attendance_on(&self, date: NaiveDate) -> Result<Vec<AttendanceEntry>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<AttendanceRow> = attendance::table
            .filter(attendance::date.eq(date))
            .order(attendance::employee_id.asc())
            .select(AttendanceRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_attendance_entry).collect()
    }

    fn record_training(
        &self,
        record: &NewTrainingRecord,
    ) -> Result<TrainingRecord, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if !employee_exists(&mut conn, record.employee_id).map_err(map_diesel_error)? {
            return Err(RepositoryError::missing("employee", record.employee_id));
        }
        let row = conn
            .transaction(|conn| {
                let new_row = NewTrainingRecordRow {
                    employee_id: Some(record.employee_id),
                    training_name: Some(&record.training_name),
                    date_completed: record.date_completed,
                    expiry_date: record.expiry_date,
                    score: record.score.as_deref(),
                };
                diesel::insert_into(training_records::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                training_records::table
                    .find(id)
                    .select(TrainingRecordRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_training_record(row))
    }

    fn list_training(&self) -> Result<Vec<TrainingRecord>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<TrainingRecordRow> = training_records::table
            .order(training_records::id.desc())
            .select(TrainingRecordRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_training_record).collect())
    }
}
