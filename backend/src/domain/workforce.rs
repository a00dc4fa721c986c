//! Employees, payroll, attendance, and training.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::labels::define_label_enum;

/// Fraction of basic salary withheld as deductions by a payroll run.
pub const PAYROLL_DEDUCTION_RATE: f64 = 0.05;

/// Contract type stamped on every labour-console registration.
pub const LABOUR_CONTRACT_TYPE: &str = "Labour";

define_label_enum! {
    /// Payment state of a payroll entry.
    pub enum PayrollStatus as "payroll status" {
        Paid => "Paid",
        Pending => "Pending",
    }
}

define_label_enum! {
    /// Attendance outcome for one employee on one day.
    pub enum AttendanceStatus as "attendance status" {
        Present => "Present",
        Absent => "Absent",
        HalfDay => "Half Day",
        Leave => "Leave",
    }
}

define_label_enum! {
    /// Engagement terms the contractor console offers at registration.
    ///
    /// The labour console does not offer a choice; it always registers
    /// workers under the fixed "Labour" contract type.
    pub enum EngagementTerms as "engagement terms" {
        Contract => "Contract",
        DailyWage => "Daily Wage",
        Permanent => "Permanent",
    }
}

/// A staff member or site worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Surrogate id.
    pub id: i32,
    /// Full name (required).
    pub name: String,
    /// Designation or trade, e.g. "Engineer" or "Mason".
    pub role: Option<String>,
    /// Department or site assignment.
    pub department: Option<String>,
    /// Joined on.
    pub joining_date: Option<NaiveDate>,
    /// Monthly salary for staff, daily wage for site workers.
    pub salary: f64,
    /// Engagement terms: "Permanent", "Contract", "Labour", "Daily Wage".
    pub contract_type: Option<String>,
    /// Inactive employees drop out of directories and payroll runs.
    pub active: bool,
}

/// Input for onboarding an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Full name (required).
    pub name: String,
    /// Designation or trade.
    pub role: Option<String>,
    /// Department or site assignment.
    pub department: Option<String>,
    /// Joined on.
    pub joining_date: Option<NaiveDate>,
    /// Monthly salary or daily wage.
    pub salary: f64,
    /// Engagement terms.
    pub contract_type: Option<String>,
}

impl NewEmployee {
    /// An unpaid employee with only the name filled in.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            department: None,
            joining_date: None,
            salary: 0.0,
            contract_type: None,
        }
    }
}

/// Full overwrite of a worker's master data, as the consoles edit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerUpdate {
    /// New full name.
    pub name: String,
    /// New designation or trade.
    pub role: Option<String>,
    /// New salary or wage.
    pub salary: f64,
    /// New active flag.
    pub active: bool,
}

/// One employee's pay for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// Surrogate id.
    pub id: i32,
    /// The paid employee.
    pub employee_id: Option<i32>,
    /// Pay period as "YYYY-MM".
    pub month: String,
    /// Gross pay for the period.
    pub basic_salary: Option<f64>,
    /// Withheld amount.
    pub deductions: f64,
    /// Gross minus deductions.
    pub net_salary: Option<f64>,
    /// Payment state.
    pub status: PayrollStatus,
}

/// Outcome of one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The processed "YYYY-MM" period.
    pub month: String,
    /// Entries written by this run.
    pub processed: usize,
    /// Active employees skipped because the period was already paid.
    pub skipped: usize,
}

/// One attendance row: one employee, one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Surrogate id.
    pub id: i32,
    /// The marked employee.
    pub employee_id: Option<i32>,
    /// Attendance date.
    pub date: NaiveDate,
    /// Outcome.
    pub status: AttendanceStatus,
    /// Hours on site.
    pub hours_worked: f64,
}

/// One mark inside a batched attendance submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceMark {
    /// The marked employee.
    pub employee_id: i32,
    /// Outcome.
    pub status: AttendanceStatus,
    /// Hours on site.
    pub hours_worked: f64,
}

/// A completed training or certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Surrogate id.
    pub id: i32,
    /// The trained employee.
    pub employee_id: Option<i32>,
    /// Course or certificate name.
    pub training_name: Option<String>,
    /// Completed on.
    pub date_completed: Option<NaiveDate>,
    /// Certificate expiry, when it lapses.
    pub expiry_date: Option<NaiveDate>,
    /// Free-form performance rating, e.g. "Proficient".
    pub score: Option<String>,
}

/// Input for recording a training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrainingRecord {
    /// The trained employee.
    pub employee_id: i32,
    /// Course or certificate name.
    pub training_name: String,
    /// Completed on.
    pub date_completed: Option<NaiveDate>,
    /// Certificate expiry.
    pub expiry_date: Option<NaiveDate>,
    /// Free-form performance rating.
    pub score: Option<String>,
}
