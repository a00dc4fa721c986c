//! Diesel queryable rows for the module-screen tables.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::outbound::persistence::pool::MultiBackend;
use crate::outbound::persistence::schema::{
    asset_logs, assets, attendance, bills, clients, contracts, document_assets, employees,
    finance_records, hse_records, inventory_items, invoices, maintenance_schedules, payroll,
    production_logs, projects, purchase_orders, quality_checks, software_assets, training_records,
    vendors,
};

/// Queryable row for projects.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct ProjectRow {
    pub id: i32,
    pub name: String,
    pub client: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub total_budget: f64,
    pub currency: String,
    pub company_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub client_id: Option<i32>,
    pub description: Option<String>,
    pub progress: i32,
}

/// Queryable row for clients.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct ClientRow {
    pub id: i32,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Queryable row for vendors.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vendors)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct VendorRow {
    pub id: i32,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub rating: i32,
}

/// Queryable row for purchase orders.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = purchase_orders)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct PurchaseOrderRow {
    pub id: i32,
    pub vendor_id: Option<i32>,
    pub order_date: NaiveDate,
    pub expected_delivery: Option<NaiveDate>,
    pub total_amount: f64,
    pub currency: String,
    pub status: String,
}

/// Queryable row for inventory items.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = inventory_items)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct InventoryItemRow {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub current_stock: f64,
    pub unit: Option<String>,
    pub min_stock_alert: f64,
    pub location: Option<String>,
    pub last_updated: NaiveDateTime,
}

/// Queryable row for plant assets.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct AssetRow {
    pub id: i32,
    pub name: String,
    pub kind: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,
    pub next_service_due: Option<NaiveDate>,
    pub status: String,
}

/// Queryable row for asset usage logs.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = asset_logs)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct AssetLogRow {
    pub id: i32,
    pub asset_id: Option<i32>,
    pub date: NaiveDate,
    pub hours_used: f64,
    pub fuel_consumed: f64,
    pub notes: Option<String>,
}

/// Queryable row for ledger entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = finance_records)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct FinanceRecordRow {
    pub id: i32,
    pub date: NaiveDate,
    pub kind: String,
    pub category: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub exchange_rate: f64,
    pub company_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub description: Option<String>,
    pub payment_method: Option<String>,
}

/// Queryable row for employees.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub role: Option<String>,
    pub department: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub salary: f64,
    pub contract_type: Option<String>,
    pub is_active: bool,
}

/// Queryable row for payroll entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payroll)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct PayrollRow {
    pub id: i32,
    pub employee_id: Option<i32>,
    pub month: String,
    pub basic_salary: Option<f64>,
    pub deductions: f64,
    pub net_salary: Option<f64>,
    pub status: String,
}

/// Queryable row for attendance entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attendance)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct AttendanceRow {
    pub id: i32,
    pub employee_id: Option<i32>,
    pub date: NaiveDate,
    pub status: String,
    pub hours_worked: f64,
}

/// Queryable row for production logs.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = production_logs)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct ProductionLogRow {
    pub id: i32,
    pub date: NaiveDate,
    pub project_id: Option<i32>,
    pub quantity_produced: f64,
    pub efficiency: Option<f64>,
    pub waste_generated: f64,
    pub notes: Option<String>,
}

/// Queryable row for software licences.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = software_assets)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct SoftwareAssetRow {
    pub id: i32,
    pub name: String,
    pub version: Option<String>,
    pub license_key: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub status: String,
    pub assigned_to: Option<String>,
}

/// Queryable row for maintenance tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = maintenance_schedules)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct MaintenanceTaskRow {
    pub id: i32,
    pub asset_id: Option<i32>,
    pub task_name: String,
    pub scheduled_date: Option<NaiveDate>,
    pub performed_date: Option<NaiveDate>,
    pub status: String,
    pub cost: f64,
    pub technician: Option<String>,
}

/// Queryable row for invoices.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct InvoiceRow {
    pub id: i32,
    pub project_id: Option<i32>,
    pub invoice_number: String,
    pub date_issued: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub amount: f64,
    pub status: String,
}

/// Queryable row for bills.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bills)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct BillRow {
    pub id: i32,
    pub vendor_id: Option<i32>,
    pub po_id: Option<i32>,
    pub bill_number: Option<String>,
    pub date_received: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub amount: f64,
    pub status: String,
}

/// Queryable row for HSE records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hse_records)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct HseRecordRow {
    pub id: i32,
    pub date: NaiveDate,
    pub project_id: Option<i32>,
    pub incident_type: Option<String>,
    pub description: Option<String>,
    pub action_taken: Option<String>,
    pub reported_by: Option<String>,
    pub status: String,
}

/// Queryable row for quality checks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quality_checks)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct QualityCheckRow {
    pub id: i32,
    pub date: NaiveDate,
    pub production_id: Option<i32>,
    pub parameter: Option<String>,
    pub result: Option<String>,
    pub remarks: Option<String>,
}

/// Queryable row for filed documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = document_assets)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct DocumentAssetRow {
    pub id: i32,
    pub title: String,
    pub category: Option<String>,
    pub file_path: Option<String>,
    pub upload_date: NaiveDate,
    pub project_id: Option<i32>,
}

/// Queryable row for training records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = training_records)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct TrainingRecordRow {
    pub id: i32,
    pub employee_id: Option<i32>,
    pub training_name: Option<String>,
    pub date_completed: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub score: Option<String>,
}

/// Queryable row for contracts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contracts)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct ContractRow {
    pub id: i32,
    pub title: String,
    pub client_id: Option<i32>,
    pub project_id: Option<i32>,
    pub contract_value: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub terms: Option<String>,
}
