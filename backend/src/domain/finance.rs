//! Ledger entries, receivables, and payables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::labels::define_label_enum;

/// Currency code used wherever none is chosen explicitly.
pub const DEFAULT_CURRENCY: &str = "INR";

define_label_enum! {
    /// Direction of a ledger entry.
    pub enum TransactionKind as "transaction type" {
        Income => "Income",
        Expense => "Expense",
    }
}

define_label_enum! {
    /// Payment state of a receivable invoice.
    pub enum InvoiceStatus as "invoice status" {
        Unpaid => "Unpaid",
        Paid => "Paid",
        PartiallyPaid => "Partially Paid",
    }
}

define_label_enum! {
    /// Payment state of a payable bill.
    pub enum BillStatus as "bill status" {
        Unpaid => "Unpaid",
        Paid => "Paid",
    }
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
    /// Surrogate id.
    pub id: i32,
    /// Transaction date.
    pub date: NaiveDate,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Grouping, e.g. "Materials".
    pub category: Option<String>,
    /// Positive amount in `currency`.
    pub amount: f64,
    /// Transaction currency code.
    pub currency: String,
    /// Rate to the base currency at booking time.
    pub exchange_rate: f64,
    /// Owning company.
    pub company_id: Option<i32>,
    /// Owning branch.
    pub branch_id: Option<i32>,
    /// Free-text narration.
    pub description: Option<String>,
    /// How it settled, e.g. "Cash".
    pub payment_method: Option<String>,
}

/// Input for posting a ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFinanceRecord {
    /// Transaction date.
    pub date: NaiveDate,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Grouping.
    pub category: Option<String>,
    /// Positive amount.
    pub amount: f64,
    /// Transaction currency code.
    pub currency: String,
    /// Rate to the base currency.
    pub exchange_rate: f64,
    /// Free-text narration.
    pub description: Option<String>,
    /// How it settled.
    pub payment_method: Option<String>,
}

impl NewFinanceRecord {
    /// An entry in the default currency at par.
    pub fn new(date: NaiveDate, kind: TransactionKind, amount: f64) -> Self {
        Self {
            date,
            kind,
            category: None,
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            exchange_rate: 1.0,
            description: None,
            payment_method: None,
        }
    }
}

/// Ledger totals by direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinanceTotals {
    /// Sum of income entries.
    pub income: f64,
    /// Sum of expense entries.
    pub expense: f64,
}

impl FinanceTotals {
    /// Net cash position: income minus expense.
    #[must_use]
    pub fn net(self) -> f64 {
        self.income - self.expense
    }
}

/// A receivable raised against a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Surrogate id.
    pub id: i32,
    /// Billed project.
    pub project_id: Option<i32>,
    /// Unique human-facing number.
    pub invoice_number: String,
    /// Issued on.
    pub date_issued: NaiveDate,
    /// Payment due by.
    pub due_date: Option<NaiveDate>,
    /// Invoiced amount.
    pub amount: f64,
    /// Payment state.
    pub status: InvoiceStatus,
}

/// Input for raising an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    /// Billed project.
    pub project_id: Option<i32>,
    /// Unique human-facing number (required).
    pub invoice_number: String,
    /// Issued on.
    pub date_issued: NaiveDate,
    /// Payment due by.
    pub due_date: Option<NaiveDate>,
    /// Invoiced amount.
    pub amount: f64,
}

/// A payable received from a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Surrogate id.
    pub id: i32,
    /// Billing vendor.
    pub vendor_id: Option<i32>,
    /// Originating purchase order.
    pub po_id: Option<i32>,
    /// Vendor's bill number.
    pub bill_number: Option<String>,
    /// Received on.
    pub date_received: NaiveDate,
    /// Payment due by.
    pub due_date: Option<NaiveDate>,
    /// Billed amount.
    pub amount: f64,
    /// Payment state.
    pub status: BillStatus,
}

/// Input for recording a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBill {
    /// Billing vendor.
    pub vendor_id: Option<i32>,
    /// Originating purchase order.
    pub po_id: Option<i32>,
    /// Vendor's bill number.
    pub bill_number: Option<String>,
    /// Received on.
    pub date_received: NaiveDate,
    /// Payment due by.
    pub due_date: Option<NaiveDate>,
    /// Billed amount.
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_position_subtracts_expense_from_income() {
        let totals = FinanceTotals {
            income: 1500.0,
            expense: 400.0,
        };
        assert!((totals.net() - 1100.0).abs() < f64::EPSILON);
    }
}
