//! Diesel insertable and changeset rows for the module-screen tables.
//!
//! Insertables omit the columns the store assigns (ids) and the columns the
//! domain never sets on creation (`company_id` and `branch_id` on projects
//! and ledger entries stay NULL).

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::outbound::persistence::schema::{
    asset_logs, assets, attendance, bills, clients, contracts, document_assets, employees,
    finance_records, hse_records, inventory_items, invoices, maintenance_schedules, payroll,
    production_logs, projects, purchase_orders, quality_checks, software_assets, training_records,
    vendors,
};

/// Insertable struct for creating projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub name: &'a str,
    pub client: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: &'a str,
    pub total_budget: f64,
    pub currency: &'a str,
    pub client_id: Option<i32>,
    pub description: Option<&'a str>,
    pub progress: i32,
}

/// Changeset struct for partial project updates. `None` leaves a column
/// untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
pub(crate) struct ProjectRowChanges<'a> {
    pub status: Option<&'a str>,
    pub progress: Option<i32>,
    pub total_budget: Option<f64>,
}

/// Insertable struct for creating clients.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
pub(crate) struct NewClientRow<'a> {
    pub name: &'a str,
    pub company: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for registering vendors.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vendors)]
pub(crate) struct NewVendorRow<'a> {
    pub name: &'a str,
    pub contact_person: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub rating: i32,
}

/// Insertable struct for raising purchase orders.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = purchase_orders)]
pub(crate) struct NewPurchaseOrderRow<'a> {
    pub vendor_id: Option<i32>,
    pub order_date: NaiveDate,
    pub expected_delivery: Option<NaiveDate>,
    pub total_amount: f64,
    pub currency: &'a str,
    pub status: &'a str,
}

/// Insertable struct for registering stock items.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = inventory_items)]
pub(crate) struct NewInventoryItemRow<'a> {
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub current_stock: f64,
    pub unit: Option<&'a str>,
    pub min_stock_alert: f64,
    pub location: Option<&'a str>,
    pub last_updated: NaiveDateTime,
}

/// Changeset struct for master-data item updates. `None` leaves a column
/// untouched; stock itself only moves through the adjustment path.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = inventory_items)]
pub(crate) struct InventoryItemRowChanges<'a> {
    pub name: Option<&'a str>,
    pub category: Option<&'a str>,
    pub unit: Option<&'a str>,
    pub min_stock_alert: Option<f64>,
    pub location: Option<&'a str>,
}

/// Insertable struct for registering plant assets.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assets)]
pub(crate) struct NewAssetRow<'a> {
    pub name: &'a str,
    pub kind: Option<&'a str>,
    pub purchase_date: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_due: Option<NaiveDate>,
    pub status: &'a str,
}

/// Insertable struct for recording asset usage.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = asset_logs)]
pub(crate) struct NewAssetLogRow<'a> {
    pub asset_id: Option<i32>,
    pub date: NaiveDate,
    pub hours_used: f64,
    pub fuel_consumed: f64,
    pub notes: Option<&'a str>,
}

/// Insertable struct for posting ledger entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = finance_records)]
pub(crate) struct NewFinanceRecordRow<'a> {
    pub date: NaiveDate,
    pub kind: &'a str,
    pub category: Option<&'a str>,
    pub amount: f64,
    pub currency: &'a str,
    pub exchange_rate: f64,
    pub description: Option<&'a str>,
    pub payment_method: Option<&'a str>,
}

/// Insertable struct for enrolling employees.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub(crate) struct NewEmployeeRow<'a> {
    pub name: &'a str,
    pub role: Option<&'a str>,
    pub department: Option<&'a str>,
    pub joining_date: Option<NaiveDate>,
    pub salary: f64,
    pub contract_type: Option<&'a str>,
    pub is_active: bool,
}

/// Insertable struct for writing payroll entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payroll)]
pub(crate) struct NewPayrollRow<'a> {
    pub employee_id: Option<i32>,
    pub month: &'a str,
    pub basic_salary: Option<f64>,
    pub deductions: f64,
    pub net_salary: Option<f64>,
    pub status: &'a str,
}

/// Insertable struct for marking attendance.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attendance)]
pub(crate) struct NewAttendanceRow<'a> {
    pub employee_id: Option<i32>,
    pub date: NaiveDate,
    pub status: &'a str,
    pub hours_worked: f64,
}

/// Insertable struct for recording production output.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = production_logs)]
pub(crate) struct NewProductionLogRow<'a> {
    pub date: NaiveDate,
    pub project_id: Option<i32>,
    pub quantity_produced: f64,
    pub efficiency: Option<f64>,
    pub waste_generated: f64,
    pub notes: Option<&'a str>,
}

/// Insertable struct for registering software licences.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = software_assets)]
pub(crate) struct NewSoftwareAssetRow<'a> {
    pub name: &'a str,
    pub version: Option<&'a str>,
    pub license_key: Option<&'a str>,
    pub expiry_date: Option<NaiveDate>,
    pub status: &'a str,
    pub assigned_to: Option<&'a str>,
}

/// Insertable struct for scheduling maintenance tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = maintenance_schedules)]
pub(crate) struct NewMaintenanceTaskRow<'a> {
    pub asset_id: Option<i32>,
    pub task_name: &'a str,
    pub scheduled_date: Option<NaiveDate>,
    pub performed_date: Option<NaiveDate>,
    pub status: &'a str,
    pub cost: f64,
    pub technician: Option<&'a str>,
}

/// Insertable struct for raising invoices.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub(crate) struct NewInvoiceRow<'a> {
    pub project_id: Option<i32>,
    pub invoice_number: &'a str,
    pub date_issued: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub amount: f64,
    pub status: &'a str,
}

/// Insertable struct for recording bills.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bills)]
pub(crate) struct NewBillRow<'a> {
    pub vendor_id: Option<i32>,
    pub po_id: Option<i32>,
    pub bill_number: Option<&'a str>,
    pub date_received: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub amount: f64,
    pub status: &'a str,
}

/// Insertable struct for filing HSE records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hse_records)]
pub(crate) struct NewHseRecordRow<'a> {
    pub date: NaiveDate,
    pub project_id: Option<i32>,
    pub incident_type: Option<&'a str>,
    pub description: Option<&'a str>,
    pub action_taken: Option<&'a str>,
    pub reported_by: Option<&'a str>,
    pub status: &'a str,
}

/// Insertable struct for recording quality checks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = quality_checks)]
pub(crate) struct NewQualityCheckRow<'a> {
    pub date: NaiveDate,
    pub production_id: Option<i32>,
    pub parameter: Option<&'a str>,
    pub result: Option<&'a str>,
    pub remarks: Option<&'a str>,
}

/// Insertable struct for filing documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = document_assets)]
pub(crate) struct NewDocumentAssetRow<'a> {
    pub title: &'a str,
    pub category: Option<&'a str>,
    pub file_path: Option<&'a str>,
    pub upload_date: NaiveDate,
    pub project_id: Option<i32>,
}

/// Insertable struct for recording trainings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = training_records)]
pub(crate) struct NewTrainingRecordRow<'a> {
    pub employee_id: Option<i32>,
    pub training_name: Option<&'a str>,
    pub date_completed: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub score: Option<&'a str>,
}

/// Insertable struct for creating contracts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contracts)]
pub(crate) struct NewContractRow<'a> {
    pub title: &'a str,
    pub client_id: Option<i32>,
    pub project_id: Option<i32>,
    pub contract_value: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: &'a str,
    pub terms: Option<&'a str>,
}
