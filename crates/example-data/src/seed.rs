//! Generated dataset record types.
//!
//! These types mirror the backend's entities without depending on them.
//! Dates are signed day offsets from the day the dataset is materialized,
//! keeping generation deterministic; the consumer resolves them against its
//! own clock.

use serde::{Deserialize, Serialize};

/// Role assigned to a demonstration login account.
///
/// Mirrors the backend's role enum without creating a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleSeed {
    /// Full access to every screen.
    Owner,
    /// Planning, production, and reporting access.
    Director,
    /// Finance, HR, and reporting access.
    AccountingStaff,
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatusSeed {
    /// Not yet started.
    Planned,
    /// Under construction.
    Active,
    /// Handed over.
    Completed,
    /// Paused.
    OnHold,
}

/// Ledger entry direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionTypeSeed {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

/// CRM client lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientStatusSeed {
    /// Prospective client.
    Lead,
    /// Client with running work.
    Active,
    /// Dormant client.
    Inactive,
}

/// A fixed demonstration login account.
///
/// The password is plain text here; the consumer hashes it at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoAccountSeed {
    /// Human-readable display name.
    pub display_name: String,
    /// Unique login email.
    pub email: String,
    /// Role granted to the account.
    pub role: RoleSeed,
    /// Plain-text demonstration password.
    pub password: String,
}

/// A generated construction project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSeed {
    /// Project name.
    pub name: String,
    /// Free-text client label.
    pub client: String,
    /// Start date as a day offset from today (zero or negative).
    pub start_offset_days: i64,
    /// Project duration in days; the end date is start plus this.
    pub duration_days: i64,
    /// Lifecycle status.
    pub status: ProjectStatusSeed,
    /// Total budget in base currency.
    pub total_budget: f64,
    /// Completion percentage, 0 to 100.
    pub progress: i32,
    /// Short description.
    pub description: String,
}

/// A generated CRM client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSeed {
    /// Client name.
    pub name: String,
    /// Company the contact belongs to.
    pub company: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Lifecycle status.
    pub status: ClientStatusSeed,
}

/// A generated vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSeed {
    /// Vendor name.
    pub name: String,
    /// Named contact person.
    pub contact_person: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Rating from 1 to 5.
    pub rating: i32,
}

/// A generated inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemSeed {
    /// Item name, unique within the dataset.
    pub name: String,
    /// Stock category.
    pub category: String,
    /// Quantity on hand.
    pub current_stock: i32,
    /// Unit of measure.
    pub unit: String,
    /// Reorder threshold.
    pub min_stock_alert: i32,
    /// Storage location.
    pub location: String,
}

/// A generated employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSeed {
    /// Employee name.
    pub name: String,
    /// Job role.
    pub role: String,
    /// Department name.
    pub department: String,
    /// Monthly salary in base currency.
    pub salary: f64,
    /// Joining date as a day offset from today (zero or negative).
    pub joining_offset_days: i64,
}

/// A generated finance ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecordSeed {
    /// Entry date as a day offset from today (zero or negative).
    pub date_offset_days: i64,
    /// Entry direction.
    pub transaction_type: TransactionTypeSeed,
    /// Ledger category.
    pub category: String,
    /// Amount in base currency.
    pub amount: f64,
    /// Free-text description.
    pub description: String,
    /// Payment method label.
    pub payment_method: String,
}

/// A complete demonstration dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoDataset {
    /// Fixed login accounts, one per role.
    pub accounts: Vec<DemoAccountSeed>,
    /// Generated projects.
    pub projects: Vec<ProjectSeed>,
    /// Generated CRM clients.
    pub clients: Vec<ClientSeed>,
    /// Generated vendors.
    pub vendors: Vec<VendorSeed>,
    /// Generated inventory items.
    pub inventory_items: Vec<InventoryItemSeed>,
    /// Generated employees.
    pub employees: Vec<EmployeeSeed>,
    /// Generated finance ledger entries.
    pub finance_records: Vec<FinanceRecordSeed>,
}
