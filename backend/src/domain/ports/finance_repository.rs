//! Port for the ledger, receivables, and payables.

use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::domain::finance::{
    Bill, BillStatus, FinanceRecord, FinanceTotals, Invoice, InvoiceStatus, NewBill,
    NewFinanceRecord, NewInvoice, TransactionKind,
};

/// Port for the money store behind the finance screen.
#[cfg_attr(test, mockall::automock)]
pub trait FinanceRepository: Send + Sync {
    /// Post a ledger entry and return it with its assigned id.
    fn post_entry(&self, entry: &NewFinanceRecord) -> Result<FinanceRecord, RepositoryError>;

    /// All ledger entries, newest first.
    fn list_entries(&self) -> Result<Vec<FinanceRecord>, RepositoryError>;

    /// Income and expense sums across the whole ledger.
    fn totals(&self) -> Result<FinanceTotals, RepositoryError>;

    /// Raise a receivable invoice; `invoice_number` must be unique.
    fn raise_invoice(&self, invoice: &NewInvoice) -> Result<Invoice, RepositoryError>;

    /// All invoices, newest first.
    fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError>;

    /// Move an invoice to a new payment state.
    fn set_invoice_status(
        &self,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> Result<(), RepositoryError>;

    /// Record a payable bill.
    fn record_bill(&self, bill: &NewBill) -> Result<Bill, RepositoryError>;

    /// All bills, newest first.
    fn list_bills(&self) -> Result<Vec<Bill>, RepositoryError>;

    /// Move a bill to a new payment state.
    fn set_bill_status(&self, bill_id: i32, status: BillStatus) -> Result<(), RepositoryError>;
}

#[derive(Debug, Default)]
struct FinanceRows {
    entries: Vec<FinanceRecord>,
    invoices: Vec<Invoice>,
    bills: Vec<Bill>,
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryFinanceRepository {
    rows: Mutex<FinanceRows>,
}

impl MemoryFinanceRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut FinanceRows) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl FinanceRepository for MemoryFinanceRepository {
    fn post_entry(&self, entry: &NewFinanceRecord) -> Result<FinanceRecord, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
            let record = FinanceRecord {
                id,
                date: entry.date,
                kind: entry.kind,
                category: entry.category.clone(),
                amount: entry.amount,
                currency: entry.currency.clone(),
                exchange_rate: entry.exchange_rate,
                company_id: None,
                branch_id: None,
                description: entry.description.clone(),
                payment_method: entry.payment_method.clone(),
            };
            rows.entries.push(record.clone());
            record
        }))
    }

    fn list_entries(&self) -> Result<Vec<FinanceRecord>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut entries = rows.entries.clone();
            entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
            entries
        }))
    }

    fn totals(&self) -> Result<FinanceTotals, RepositoryError> {
        Ok(self.with_rows(|rows| {
            rows.entries
                .iter()
                .fold(FinanceTotals::default(), |mut totals, entry| {
                    match entry.kind {
                        TransactionKind::Income => totals.income += entry.amount,
                        TransactionKind::Expense => totals.expense += entry.amount,
                    }
                    totals
                })
        }))
    }

    fn raise_invoice(&self, invoice: &NewInvoice) -> Result<Invoice, RepositoryError> {
        self.with_rows(|rows| {
            if rows
                .invoices
                .iter()
                .any(|i| i.invoice_number == invoice.invoice_number)
            {
                return Err(RepositoryError::constraint(format!(
                    "invoice number {} already issued",
                    invoice.invoice_number
                )));
            }
            let id = rows.invoices.iter().map(|i| i.id).max().unwrap_or(0) + 1;
            let invoice = Invoice {
                id,
                project_id: invoice.project_id,
                invoice_number: invoice.invoice_number.clone(),
                date_issued: invoice.date_issued,
                due_date: invoice.due_date,
                amount: invoice.amount,
                status: InvoiceStatus::Unpaid,
            };
            rows.invoices.push(invoice.clone());
            Ok(invoice)
        })
    }

    fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut invoices = rows.invoices.clone();
            invoices.sort_by_key(|i| std::cmp::Reverse(i.id));
            invoices
        }))
    }

    fn set_invoice_status(
        &self,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let invoice = rows
                .invoices
                .iter_mut()
                .find(|i| i.id == invoice_id)
                .ok_or_else(|| RepositoryError::missing("invoice", invoice_id))?;
            invoice.status = status;
            Ok(())
        })
    }

    fn record_bill(&self, bill: &NewBill) -> Result<Bill, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.bills.iter().map(|b| b.id).max().unwrap_or(0) + 1;
            let bill = Bill {
                id,
                vendor_id: bill.vendor_id,
                po_id: bill.po_id,
                bill_number: bill.bill_number.clone(),
                date_received: bill.date_received,
                due_date: bill.due_date,
                amount: bill.amount,
                status: BillStatus::Unpaid,
            };
            rows.bills.push(bill.clone());
            bill
        }))
    }

    fn list_bills(&self) -> Result<Vec<Bill>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut bills = rows.bills.clone();
            bills.sort_by_key(|b| std::cmp::Reverse(b.id));
            bills
        }))
    }

    fn set_bill_status(&self, bill_id: i32, status: BillStatus) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let bill = rows
                .bills
                .iter_mut()
                .find(|b| b.id == bill_id)
                .ok_or_else(|| RepositoryError::missing("bill", bill_id))?;
            bill.status = status;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[rstest]
    fn totals_split_by_direction() {
        let repo = MemoryFinanceRepository::new();
        repo.post_entry(&NewFinanceRecord::new(day(1), TransactionKind::Income, 900.0))
            .unwrap();
        repo.post_entry(&NewFinanceRecord::new(day(2), TransactionKind::Income, 100.0))
            .unwrap();
        repo.post_entry(&NewFinanceRecord::new(
            day(3),
            TransactionKind::Expense,
            250.0,
        ))
        .unwrap();

        let totals = repo.totals().unwrap();
        assert!((totals.income - 1000.0).abs() < f64::EPSILON);
        assert!((totals.expense - 250.0).abs() < f64::EPSILON);
        assert!((totals.net() - 750.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn entries_list_newest_date_first() {
        let repo = MemoryFinanceRepository::new();
        repo.post_entry(&NewFinanceRecord::new(day(20), TransactionKind::Income, 1.0))
            .unwrap();
        repo.post_entry(&NewFinanceRecord::new(
            day(25),
            TransactionKind::Expense,
            2.0,
        ))
        .unwrap();
        repo.post_entry(&NewFinanceRecord::new(day(5), TransactionKind::Income, 3.0))
            .unwrap();

        let dates: Vec<_> = repo
            .list_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, [day(25), day(20), day(5)]);
    }

    #[rstest]
    fn duplicate_invoice_numbers_are_rejected() {
        let repo = MemoryFinanceRepository::new();
        let invoice = NewInvoice {
            project_id: None,
            invoice_number: "INV-2024-001".to_owned(),
            date_issued: day(1),
            due_date: None,
            amount: 12_000.0,
        };
        repo.raise_invoice(&invoice).unwrap();

        let err = repo.raise_invoice(&invoice).unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint { .. }));
    }

    #[rstest]
    fn marking_a_bill_paid_updates_its_state() {
        let repo = MemoryFinanceRepository::new();
        let bill = repo
            .record_bill(&NewBill {
                vendor_id: None,
                po_id: None,
                bill_number: Some("B-77".to_owned()),
                date_received: day(4),
                due_date: Some(day(30)),
                amount: 5_600.0,
            })
            .unwrap();
        assert_eq!(bill.status, BillStatus::Unpaid);

        repo.set_bill_status(bill.id, BillStatus::Paid).unwrap();
        assert_eq!(repo.list_bills().unwrap()[0].status, BillStatus::Paid);
    }
}
