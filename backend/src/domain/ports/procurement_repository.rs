//! Port for vendors and purchase orders.

use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::domain::procurement::{
    NewPurchaseOrder, NewVendor, OrderStatus, PurchaseOrder, Vendor,
};

/// Port for the procurement store.
#[cfg_attr(test, mockall::automock)]
pub trait ProcurementRepository: Send + Sync {
    /// Register a vendor and return it with its assigned id.
    fn insert_vendor(&self, vendor: &NewVendor) -> Result<Vendor, RepositoryError>;

    /// All vendors, oldest first.
    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError>;

    /// Raise a purchase order and return it with its assigned id.
    fn insert_order(&self, order: &NewPurchaseOrder) -> Result<PurchaseOrder, RepositoryError>;

    /// All purchase orders, newest first.
    fn list_orders(&self) -> Result<Vec<PurchaseOrder>, RepositoryError>;

    /// Move an order to a new lifecycle state.
    fn set_order_status(&self, order_id: i32, status: OrderStatus)
    -> Result<(), RepositoryError>;
}

#[derive(Debug, Default)]
struct ProcurementRows {
    vendors: Vec<Vendor>,
    orders: Vec<PurchaseOrder>,
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryProcurementRepository {
    rows: Mutex<ProcurementRows>,
}

impl MemoryProcurementRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut ProcurementRows) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl ProcurementRepository for MemoryProcurementRepository {
    fn insert_vendor(&self, vendor: &NewVendor) -> Result<Vendor, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.vendors.iter().map(|v| v.id).max().unwrap_or(0) + 1;
            let vendor = Vendor {
                id,
                name: vendor.name.clone(),
                contact_person: vendor.contact_person.clone(),
                phone: vendor.phone.clone(),
                email: vendor.email.clone(),
                rating: vendor.rating,
            };
            rows.vendors.push(vendor.clone());
            vendor
        }))
    }

    fn list_vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        Ok(self.with_rows(|rows| rows.vendors.clone()))
    }

    fn insert_order(&self, order: &NewPurchaseOrder) -> Result<PurchaseOrder, RepositoryError> {
        self.with_rows(|rows| {
            if let Some(vendor_id) = order.vendor_id {
                if !rows.vendors.iter().any(|v| v.id == vendor_id) {
                    return Err(RepositoryError::missing("vendor", vendor_id));
                }
            }
            let id = rows.orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
            let order = PurchaseOrder {
                id,
                vendor_id: order.vendor_id,
                order_date: order.order_date,
                expected_delivery: order.expected_delivery,
                total_amount: order.total_amount,
                currency: order.currency.clone(),
                status: order.status,
            };
            rows.orders.push(order.clone());
            Ok(order)
        })
    }

    fn list_orders(&self) -> Result<Vec<PurchaseOrder>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut orders = rows.orders.clone();
            orders.sort_by_key(|o| std::cmp::Reverse(o.id));
            orders
        }))
    }

    fn set_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let order = rows
                .orders
                .iter_mut()
                .find(|o| o.id == order_id)
                .ok_or_else(|| RepositoryError::missing("purchase order", order_id))?;
            order.status = status;
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

    fn order_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[rstest]
    fn orders_reference_an_existing_vendor() {
        let repo = MemoryProcurementRepository::new();
        let vendor = repo.insert_vendor(&NewVendor::new("Shakti Steel")).unwrap();

        let order = repo
            .insert_order(&NewPurchaseOrder::new(vendor.id, order_date(), 48_000.0))
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        let err = repo
            .insert_order(&NewPurchaseOrder::new(99, order_date(), 10.0))
            .unwrap_err();
        assert_eq!(err, RepositoryError::missing("vendor", 99_i32));
    }

    #[rstest]
    fn status_updates_walk_the_order_lifecycle() {
        let repo = MemoryProcurementRepository::new();
        let vendor = repo.insert_vendor(&NewVendor::new("Shakti Steel")).unwrap();
        let order = repo
            .insert_order(&NewPurchaseOrder::new(vendor.id, order_date(), 48_000.0))
            .unwrap();

        repo.set_order_status(order.id, OrderStatus::Approved)
            .unwrap();
        repo.set_order_status(order.id, OrderStatus::Delivered)
            .unwrap();

        assert_eq!(
            repo.list_orders().unwrap()[0].status,
            OrderStatus::Delivered
        );
    }

    #[rstest]
    fn vendors_keep_registration_order() {
        let repo = MemoryProcurementRepository::new();
        repo.insert_vendor(&NewVendor::new("Shakti Steel")).unwrap();
        repo.insert_vendor(&NewVendor::new("Apex Cement")).unwrap();

        let names: Vec<_> = repo
            .list_vendors()
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, ["Shakti Steel", "Apex Cement"]);
    }
}
