//! Purchase management screen: vendor register and purchase orders.

use std::sync::Arc;

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::ProcurementRepository;
use crate::domain::procurement::{
    NewPurchaseOrder, NewVendor, OrderStatus, PurchaseOrder, VENDOR_RATING_MAX, VENDOR_RATING_MIN,
    Vendor,
};
use crate::domain::session::Session;

/// Service behind the purchase management screen.
#[derive(Clone)]
pub struct PurchasingService<R> {
    repo: Arc<R>,
}

impl<R> PurchasingService<R>
where
    R: ProcurementRepository,
{
    /// Create a purchasing service over the given store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a vendor.
    pub fn register_vendor(
        &self,
        session: &Session,
        vendor: NewVendor,
    ) -> Result<Vendor, ModuleError> {
        authorize(session, Screen::Purchasing)?;
        require_text("name", &vendor.name)?;
        if !(VENDOR_RATING_MIN..=VENDOR_RATING_MAX).contains(&vendor.rating) {
            return Err(ValidationError::out_of_range(
                "rating",
                format!("must be between {VENDOR_RATING_MIN} and {VENDOR_RATING_MAX}"),
            )
            .into());
        }
        Ok(self.repo.insert_vendor(&vendor)?)
    }

    /// The vendor register, oldest first.
    pub fn vendors(&self, session: &Session) -> Result<Vec<Vendor>, ModuleError> {
        authorize(session, Screen::Purchasing)?;
        Ok(self.repo.list_vendors()?)
    }

    /// Raise a purchase order against a vendor.
    pub fn raise_order(
        &self,
        session: &Session,
        order: NewPurchaseOrder,
    ) -> Result<PurchaseOrder, ModuleError> {
        authorize(session, Screen::Purchasing)?;
        if order.total_amount < 0.0 {
            return Err(
                ValidationError::out_of_range("total_amount", "must not be negative").into(),
            );
        }
        Ok(self.repo.insert_order(&order)?)
    }

    /// Purchase orders, newest first.
    pub fn orders(&self, session: &Session) -> Result<Vec<PurchaseOrder>, ModuleError> {
        authorize(session, Screen::Purchasing)?;
        Ok(self.repo.list_orders()?)
    }

    /// Move an order along its lifecycle.
    pub fn set_order_status(
        &self,
        session: &Session,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::Purchasing)?;
        Ok(self.repo.set_order_status(order_id, status)?)
    }
}
