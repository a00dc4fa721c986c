//! Finance and accounts screen: ledger, receivables, and payables.

use std::sync::Arc;

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::finance::{
    Bill, BillStatus, FinanceRecord, FinanceTotals, Invoice, InvoiceStatus, NewBill,
    NewFinanceRecord, NewInvoice,
};
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::FinanceRepository;
use crate::domain::session::Session;

/// Service behind the finance and accounts screen.
#[derive(Clone)]
pub struct FinanceService<R> {
    repo: Arc<R>,
}

impl<R> FinanceService<R>
where
    R: FinanceRepository,
{
    /// Create a finance service over the given store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Post a ledger entry. Zero and negative amounts are rejected; the
    /// entry's kind carries its direction instead.
    pub fn post_entry(
        &self,
        session: &Session,
        entry: NewFinanceRecord,
    ) -> Result<FinanceRecord, ModuleError> {
        authorize(session, Screen::Finance)?;
        if entry.amount <= 0.0 {
            return Err(
                ValidationError::out_of_range("amount", "must be greater than zero").into(),
            );
        }
        Ok(self.repo.post_entry(&entry)?)
    }

    /// Ledger entries, most recent transaction date first.
    pub fn entries(&self, session: &Session) -> Result<Vec<FinanceRecord>, ModuleError> {
        authorize(session, Screen::Finance)?;
        Ok(self.repo.list_entries()?)
    }

    /// Income and expense totals; `net` on the result is the profitability.
    pub fn totals(&self, session: &Session) -> Result<FinanceTotals, ModuleError> {
        authorize(session, Screen::Finance)?;
        Ok(self.repo.totals()?)
    }

    /// Raise a receivable invoice. The number must be unique.
    pub fn raise_invoice(
        &self,
        session: &Session,
        invoice: NewInvoice,
    ) -> Result<Invoice, ModuleError> {
        authorize(session, Screen::Finance)?;
        require_text("invoice_number", &invoice.invoice_number)?;
        Ok(self.repo.raise_invoice(&invoice)?)
    }

    /// Receivables, newest first.
    pub fn invoices(&self, session: &Session) -> Result<Vec<Invoice>, ModuleError> {
        authorize(session, Screen::Finance)?;
        Ok(self.repo.list_invoices()?)
    }

    /// Move an invoice along its payment lifecycle.
    pub fn set_invoice_status(
        &self,
        session: &Session,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::Finance)?;
        Ok(self.repo.set_invoice_status(invoice_id, status)?)
    }

    /// Record a payable bill.
    pub fn record_bill(&self, session: &Session, bill: NewBill) -> Result<Bill, ModuleError> {
        authorize(session, Screen::Finance)?;
        Ok(self.repo.record_bill(&bill)?)
    }

    /// Payables, newest first.
    pub fn bills(&self, session: &Session) -> Result<Vec<Bill>, ModuleError> {
        authorize(session, Screen::Finance)?;
        Ok(self.repo.list_bills()?)
    }

    /// Move a bill along its payment lifecycle.
    pub fn set_bill_status(
        &self,
        session: &Session,
        bill_id: i32,
        status: BillStatus,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::Finance)?;
        Ok(self.repo.set_bill_status(bill_id, status)?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::error::StorageError;
    use crate::domain::finance::TransactionKind;
    use crate::domain::ports::MemoryFinanceRepository;
    use crate::domain::user::Role;
    use crate::test_support::session_as;

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date")
    }

    #[fixture]
    fn service() -> FinanceService<MemoryFinanceRepository> {
        FinanceService::new(Arc::new(MemoryFinanceRepository::new()))
    }

    #[rstest]
    #[case(0.0)]
    #[case(-250.0)]
    fn non_positive_amounts_are_rejected(
        service: FinanceService<MemoryFinanceRepository>,
        #[case] amount: f64,
    ) {
        let session = session_as(Role::AccountingStaff);
        let entry = NewFinanceRecord::new(day(1), TransactionKind::Expense, amount);
        let error = service.post_entry(&session, entry).unwrap_err();
        assert!(matches!(error, ModuleError::Validation(_)));
    }

    #[rstest]
    fn totals_fold_the_ledger(service: FinanceService<MemoryFinanceRepository>) {
        let session = session_as(Role::AccountingStaff);
        service
            .post_entry(
                &session,
                NewFinanceRecord::new(day(1), TransactionKind::Income, 1_500.0),
            )
            .unwrap();
        service
            .post_entry(
                &session,
                NewFinanceRecord::new(day(2), TransactionKind::Expense, 400.0),
            )
            .unwrap();

        let totals = service.totals(&session).unwrap();
        assert!((totals.income - 1_500.0).abs() < f64::EPSILON);
        assert!((totals.expense - 400.0).abs() < f64::EPSILON);
        assert!((totals.net() - 1_100.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn duplicate_invoice_numbers_surface_the_constraint(
        service: FinanceService<MemoryFinanceRepository>,
    ) {
        let session = session_as(Role::AccountingStaff);
        let invoice = NewInvoice {
            project_id: None,
            invoice_number: "INV-2024-001".to_owned(),
            date_issued: day(1),
            due_date: None,
            amount: 10_000.0,
        };
        service.raise_invoice(&session, invoice.clone()).unwrap();

        let error = service.raise_invoice(&session, invoice).unwrap_err();
        assert_eq!(
            error,
            ModuleError::Storage(StorageError::constraint_violation(
                "invoice number INV-2024-001 already issued"
            ))
        );
    }

    #[rstest]
    fn invoices_start_unpaid_and_can_settle(service: FinanceService<MemoryFinanceRepository>) {
        let session = session_as(Role::AccountingStaff);
        let raised = service
            .raise_invoice(
                &session,
                NewInvoice {
                    project_id: None,
                    invoice_number: "INV-2024-002".to_owned(),
                    date_issued: day(3),
                    due_date: Some(day(30)),
                    amount: 42_000.0,
                },
            )
            .unwrap();
        assert_eq!(raised.status, InvoiceStatus::Unpaid);

        service
            .set_invoice_status(&session, raised.id, InvoiceStatus::Paid)
            .unwrap();
        assert_eq!(
            service.invoices(&session).unwrap()[0].status,
            InvoiceStatus::Paid
        );
    }

    #[rstest]
    fn bills_round_trip(service: FinanceService<MemoryFinanceRepository>) {
        let session = session_as(Role::AccountingStaff);
        let bill = service
            .record_bill(
                &session,
                NewBill {
                    vendor_id: None,
                    po_id: None,
                    bill_number: Some("SS-7781".to_owned()),
                    date_received: day(5),
                    due_date: None,
                    amount: 9_300.0,
                },
            )
            .unwrap();
        assert_eq!(bill.status, BillStatus::Unpaid);

        service
            .set_bill_status(&session, bill.id, BillStatus::Paid)
            .unwrap();
        assert_eq!(service.bills(&session).unwrap()[0].status, BillStatus::Paid);
    }

    #[rstest]
    fn directors_are_turned_away(service: FinanceService<MemoryFinanceRepository>) {
        let session = session_as(Role::Director);
        let error = service.totals(&session).unwrap_err();
        assert_eq!(error, ModuleError::access_denied("Finance & Accounts"));
    }
}
