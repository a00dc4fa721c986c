//! Database-backed `ProcurementRepository` implementation using Diesel.

use diesel::prelude::*;

use crate::domain::ports::{ProcurementRepository, RepositoryError};
use crate::domain::procurement::{
    NewPurchaseOrder, NewVendor, OrderStatus, PurchaseOrder, Vendor,
};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error, parse_label};
use super::models::{NewPurchaseOrderRow, NewVendorRow, PurchaseOrderRow, VendorRow};
use super::pool::DbPool;
use super::schema::{purchase_orders, vendors};

/// Diesel-backed implementation of the procurement port.
#[derive(Clone)]
pub struct DieselProcurementRepository {
    pool: DbPool,
}

impl DieselProcurementRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_vendor(row: VendorRow) -> Vendor {
    Vendor {
        id: row.id,
        name: row.name,
        contact_person: row.contact_person,
        phone: row.phone,
        email: row.email,
        rating: row.rating,
    }
}

fn row_to_order(row: PurchaseOrderRow) -> Result<PurchaseOrder, RepositoryError> {
    Ok(PurchaseOrder {
        id: row.id,
        vendor_id: row.vendor_id,
        order_date: row.order_date,
        expected_delivery: row.expected_delivery,
        total_amount: row.total_amount,
        currency: row.currency,
        status: parse_label(&row.status)?,
    })
}

impl ProcurementRepository for DieselProcurementRepository {
    fn insert_vendor(&self, vendor: &NewVendor) -> Result<Vendor, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewVendorRow {
                    name: &vendor.name,
                    contact_person: vendor.contact_person.as_deref(),
                    phone: vendor.phone.as_deref(),
                    email: vendor.email.as_deref(),
                    rating: vendor.rating,
                };
                diesel::insert_into(vendors::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                vendors::table
                    .find(id)
                    .select(VendorRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_vendor(row))
    }

    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<VendorRow> = vendors::table
            .order(vendors::id.asc())
            .select(VendorRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_vendor).collect())
    }

    fn insert_order(&self, order: &NewPurchaseOrder) -> Result<PurchaseOrder, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if let Some(vendor_id) = order.vendor_id {
            let vendor = vendors::table
                .find(vendor_id)
                .select(vendors::id)
                .first::<i32>(&mut conn)
                .optional()
                .map_err(map_diesel_error)?;
            if vendor.is_none() {
                return Err(RepositoryError::missing("vendor", vendor_id));
            }
        }
        let row = conn
            .transaction(|conn| {
                let new_row = NewPurchaseOrderRow {
                    vendor_id: order.vendor_id,
                    order_date: order.order_date,
                    expected_delivery: order.expected_delivery,
                    total_amount: order.total_amount,
                    currency: &order.currency,
                    status: order.status.as_str(),
                };
                diesel::insert_into(purchase_orders::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                purchase_orders::table
                    .find(id)
                    .select(PurchaseOrderRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_order(row)
    }

    fn list_orders(&self) -> Result<Vec<PurchaseOrder>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<PurchaseOrderRow> = purchase_orders::table
            .order(purchase_orders::id.desc())
            .select(PurchaseOrderRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_order).collect()
    }

    fn set_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(purchase_orders::table.find(order_id))
            .set(purchase_orders::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("purchase order", order_id));
        }
        Ok(())
    }
}
