//! Vendors and purchase orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::finance::DEFAULT_CURRENCY;
use crate::domain::labels::define_label_enum;

define_label_enum! {
    /// Purchase order lifecycle states.
    pub enum OrderStatus as "order status" {
        Pending => "Pending",
        Approved => "Approved",
        Delivered => "Delivered",
    }
}

/// Lowest accepted vendor rating.
pub const VENDOR_RATING_MIN: i32 = 1;
/// Highest accepted vendor rating.
pub const VENDOR_RATING_MAX: i32 = 5;

/// A supplier of materials or services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Surrogate id.
    pub id: i32,
    /// Trading name (required).
    pub name: String,
    /// Named contact.
    pub contact_person: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Performance rating, 1 to 5.
    pub rating: i32,
}

/// Input for registering a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVendor {
    /// Trading name (required).
    pub name: String,
    /// Named contact.
    pub contact_person: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Performance rating, 1 to 5.
    pub rating: i32,
}

impl NewVendor {
    /// A vendor at the neutral default rating.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_person: None,
            phone: None,
            email: None,
            rating: 3,
        }
    }
}

/// An order raised against a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Surrogate id.
    pub id: i32,
    /// Supplying vendor.
    pub vendor_id: Option<i32>,
    /// Raised on.
    pub order_date: NaiveDate,
    /// Promised delivery.
    pub expected_delivery: Option<NaiveDate>,
    /// Order value in `currency`.
    pub total_amount: f64,
    /// Order currency code.
    pub currency: String,
    /// Lifecycle state.
    pub status: OrderStatus,
}

/// Input for raising a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    /// Supplying vendor.
    pub vendor_id: Option<i32>,
    /// Raised on.
    pub order_date: NaiveDate,
    /// Promised delivery.
    pub expected_delivery: Option<NaiveDate>,
    /// Order value.
    pub total_amount: f64,
    /// Order currency code.
    pub currency: String,
    /// Lifecycle state.
    pub status: OrderStatus,
}

impl NewPurchaseOrder {
    /// A pending order for the given vendor and value.
    pub fn new(vendor_id: i32, order_date: NaiveDate, total_amount: f64) -> Self {
        Self {
            vendor_id: Some(vendor_id),
            order_date,
            expected_delivery: None,
            total_amount,
            currency: DEFAULT_CURRENCY.to_string(),
            status: OrderStatus::Pending,
        }
    }
}
