//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations; the adapters convert each
//! row into its domain counterpart before anything leaves this layer.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use super::pool::MultiBackend;
use super::schema::{audit_records, branches, companies, system_settings, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub company_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for creating new account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub company_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Row struct for reading from the audit_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_records)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct AuditRecordRow {
    pub id: i32,
    pub user_id: Option<i32>,
    pub action: String,
    pub details: Option<String>,
    pub timestamp: NaiveDateTime,
}

/// Insertable struct for appending trail records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_records)]
pub(crate) struct NewAuditRecordRow<'a> {
    pub user_id: Option<i32>,
    pub action: &'a str,
    pub details: Option<&'a str>,
    pub timestamp: NaiveDateTime,
}

/// Row struct for reading from the companies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct CompanyRow {
    pub id: i32,
    pub name: String,
    pub fiscal_year_start: Option<NaiveDate>,
    pub base_currency: String,
    pub registration_number: Option<String>,
    pub address: Option<String>,
}

/// Insertable struct for registering companies.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub(crate) struct NewCompanyRow<'a> {
    pub name: &'a str,
    pub fiscal_year_start: Option<NaiveDate>,
    pub base_currency: &'a str,
    pub registration_number: Option<&'a str>,
    pub address: Option<&'a str>,
}

/// Row struct for reading from the branches table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = branches)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct BranchRow {
    pub id: i32,
    pub company_id: Option<i32>,
    pub name: String,
    pub location: Option<String>,
}

/// Insertable struct for registering branches.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = branches)]
pub(crate) struct NewBranchRow<'a> {
    pub company_id: Option<i32>,
    pub name: &'a str,
    pub location: Option<&'a str>,
}

/// Row struct for reading from the system_settings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = system_settings)]
#[diesel(check_for_backend(MultiBackend))]
pub(crate) struct SettingRow {
    pub id: i32,
    pub category: Option<String>,
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
}

/// Insertable struct for creating setting entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = system_settings)]
pub(crate) struct NewSettingRow<'a> {
    pub category: Option<&'a str>,
    pub key: &'a str,
    pub value: Option<&'a str>,
    pub description: Option<&'a str>,
}

mod read_rows;
mod write_rows;

pub(crate) use read_rows::{
    AssetLogRow, AssetRow, AttendanceRow, BillRow, ClientRow, ContractRow, DocumentAssetRow,
    EmployeeRow, FinanceRecordRow, HseRecordRow, InventoryItemRow, InvoiceRow, MaintenanceTaskRow,
    PayrollRow, ProductionLogRow, ProjectRow, PurchaseOrderRow, QualityCheckRow, SoftwareAssetRow,
    TrainingRecordRow, VendorRow,
};
pub(crate) use write_rows::{
    InventoryItemRowChanges, NewAssetLogRow, NewAssetRow, NewAttendanceRow, NewBillRow,
    NewClientRow, NewContractRow, NewDocumentAssetRow, NewEmployeeRow, NewFinanceRecordRow,
    NewHseRecordRow, NewInventoryItemRow, NewInvoiceRow, NewMaintenanceTaskRow, NewPayrollRow,
    NewProductionLogRow, NewProjectRow, NewPurchaseOrderRow, NewQualityCheckRow,
    NewSoftwareAssetRow, NewTrainingRecordRow, NewVendorRow, ProjectRowChanges,
};
