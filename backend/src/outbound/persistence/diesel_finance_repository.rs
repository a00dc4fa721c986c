//! Database-backed `FinanceRepository` implementation using Diesel.

use diesel::prelude::*;

use crate::domain::finance::{
    Bill, BillStatus, FinanceRecord, FinanceTotals, Invoice, InvoiceStatus, NewBill,
    NewFinanceRecord, NewInvoice, TransactionKind,
};
use crate::domain::ports::{FinanceRepository, RepositoryError};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error, parse_label};
use super::models::{BillRow, FinanceRecordRow, InvoiceRow, NewBillRow, NewFinanceRecordRow, NewInvoiceRow};
use super::pool::DbPool;
use super::schema::{bills, finance_records, invoices};

/// Diesel-backed implementation of the finance repository port.
#[derive(Clone)]
pub struct DieselFinanceRepository {
    pool: DbPool,
}

impl DieselFinanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_entry(row: FinanceRecordRow) -> Result<FinanceRecord, RepositoryError> {
    Ok(FinanceRecord {
        id: row.id,
        date: row.date,
        kind: parse_label(&row.kind)?,
        category: row.category,
        amount: row.amount,
        currency: row.currency,
        exchange_rate: row.exchange_rate,
        company_id: row.company_id,
        branch_id: row.branch_id,
        description: row.description,
        payment_method: row.payment_method,
    })
}

fn row_to_invoice(row: InvoiceRow) -> Result<Invoice, RepositoryError> {
    Ok(Invoice {
        id: row.id,
        project_id: row.project_id,
        invoice_number: row.invoice_number,
        date_issued: row.date_issued,
        due_date: row.due_date,
        amount: row.amount,
        status: parse_label(&row.status)?,
    })
}

fn row_to_bill(row: BillRow) -> Result<Bill, RepositoryError> {
    Ok(Bill {
        id: row.id,
        vendor_id: row.vendor_id,
        po_id: row.po_id,
        bill_number: row.bill_number,
        date_received: row.date_received,
        due_date: row.due_date,
        amount: row.amount,
        status: parse_label(&row.status)?,
    })
}

impl FinanceRepository for DieselFinanceRepository {
    fn post_entry(&self, entry: &NewFinanceRecord) -> Result<FinanceRecord, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewFinanceRecordRow {
                    date: entry.date,
                    kind: entry.kind.as_str(),
                    category: entry.category.as_deref(),
                    amount: entry.amount,
                    currency: &entry.currency,
                    exchange_rate: entry.exchange_rate,
                    description: entry.description.as_deref(),
                    payment_method: entry.payment_method.as_deref(),
                };
                diesel::insert_into(finance_records::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                finance_records::table
                    .find(id)
                    .select(FinanceRecordRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_entry(row)
    }

    fn list_entries(&self) -> Result<Vec<FinanceRecord>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<FinanceRecordRow> = finance_records::table
            .order((finance_records::date.desc(), finance_records::id.desc()))
            .select(FinanceRecordRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_entry).collect()
    }

    fn totals(&self) -> Result<FinanceTotals, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let entries: Vec<(String, f64)> = finance_records::table
            .select((finance_records::kind, finance_records::amount))
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        let mut totals = FinanceTotals::default();
        for (kind, amount) in entries {
            match parse_label::<TransactionKind>(&kind)? {
                TransactionKind::Income => totals.income += amount,
                TransactionKind::Expense => totals.expense += amount,
            }
        }
        Ok(totals)
    }

    fn raise_invoice(&self, invoice: &NewInvoice) -> Result<Invoice, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        // The unique index is the enforcement; this lookup supplies the
        // domain-facing message.
        let duplicate = invoices::table
            .filter(invoices::invoice_number.eq(&invoice.invoice_number))
            .select(invoices::id)
            .first::<i32>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;
        if duplicate.is_some() {
            return Err(RepositoryError::constraint(format!(
                "invoice number {} already issued",
                invoice.invoice_number
            )));
        }
        let row = conn
            .transaction(|conn| {
                let new_row = NewInvoiceRow {
                    project_id: invoice.project_id,
                    invoice_number: &invoice.invoice_number,
                    date_issued: invoice.date_issued,
                    due_date: invoice.due_date,
                    amount: invoice.amount,
                    status: InvoiceStatus::Unpaid.as_str(),
                };
                diesel::insert_into(invoices::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                invoices::table
                    .find(id)
                    .select(InvoiceRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_invoice(row)
    }

    fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<InvoiceRow> = invoices::table
            .order(invoices::id.desc())
            .select(InvoiceRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_invoice).collect()
    }

    fn set_invoice_status(
        &self,
        invoice_id: i32,
        status: InvoiceStatus,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(invoices::table.find(invoice_id))
            .set(invoices::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("invoice", invoice_id));
        }
        Ok(())
    }

    fn record_bill(&self, bill: &NewBill) -> Result<Bill, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewBillRow {
                    vendor_id: bill.vendor_id,
                    po_id: bill.po_id,
                    bill_number: bill.bill_number.as_deref(),
                    date_received: bill.date_received,
                    due_date: bill.due_date,
                    amount: bill.amount,
                    status: BillStatus::Unpaid.as_str(),
                };
                diesel::insert_into(bills::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                bills::table.find(id).select(BillRow::as_select()).first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_bill(row)
    }

    fn list_bills(&self) -> Result<Vec<Bill>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<BillRow> = bills::table
            .order(bills::id.desc())
            .select(BillRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_bill).collect()
    }

    fn set_bill_status(&self, bill_id: i32, status: BillStatus) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(bills::table.find(bill_id))
            .set(bills::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("bill", bill_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.

    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn ledger_row() -> FinanceRecordRow {
        FinanceRecordRow {
            id: 11,
            date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            kind: "Expense".into(),
            category: Some("Fuel".into()),
            amount: 250.0,
            currency: "INR".into(),
            exchange_rate: 1.0,
            company_id: None,
            branch_id: None,
            description: None,
            payment_method: Some("Cash".into()),
        }
    }

    #[rstest]
    fn ledger_rows_decode_their_kind(ledger_row: FinanceRecordRow) {
        let entry = row_to_entry(ledger_row).unwrap();

        assert_eq!(entry.kind, TransactionKind::Expense);
        assert_eq!(entry.payment_method.as_deref(), Some("Cash"));
    }

    #[rstest]
    fn unknown_kind_labels_are_reported(mut ledger_row: FinanceRecordRow) {
        ledger_row.kind = "Transfer".into();

        let error = row_to_entry(ledger_row).unwrap_err();
        assert_eq!(
            error,
            RepositoryError::query("unknown transaction type: Transfer")
        );
    }

    #[rstest]
    fn invoice_rows_decode_their_status() {
        let row = InvoiceRow {
            id: 2,
            project_id: Some(7),
            invoice_number: "INV-2024-001".into(),
            date_issued: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            due_date: None,
            amount: 12_000.0,
            status: "Partially Paid".into(),
        };

        let invoice = row_to_invoice(row).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);
    }
}
