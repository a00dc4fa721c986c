//! Database-backed `DashboardGauges` implementation using Diesel.
//!
//! The snapshot is a read model over six tables; each gauge runs as its
//! own aggregate query on one pooled connection.

use diesel::dsl::sum;
use diesel::prelude::*;

use crate::domain::finance::TransactionKind;
use crate::domain::ports::{DashboardGauges, DashboardSnapshot, RepositoryError};
use crate::domain::procurement::OrderStatus;
use crate::domain::project::ProjectStatus;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::pool::{AnyConnection, DbPool};
use super::schema::{
    clients, employees, finance_records, inventory_items, projects, purchase_orders,
};

/// Diesel-backed implementation of the dashboard read model.
#[derive(Clone)]
pub struct DieselDashboardGauges {
    pool: DbPool,
}

impl DieselDashboardGauges {
    /// Create a new read model with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn posted_total(conn: &mut AnyConnection, kind: TransactionKind) -> QueryResult<f64> {
    let total: Option<f64> = finance_records::table
        .filter(finance_records::kind.eq(kind.as_str()))
        .select(sum(finance_records::amount))
        .get_result(conn)?;
    Ok(total.unwrap_or(0.0))
}

impl DashboardGauges for DieselDashboardGauges {
    fn snapshot(&self) -> Result<DashboardSnapshot, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let snapshot = conn
            .transaction(|conn| {
                let active_projects: i64 = projects::table
                    .filter(projects::status.eq(ProjectStatus::Active.as_str()))
                    .count()
                    .get_result(conn)?;
                let total_projects: i64 = projects::table.count().get_result(conn)?;
                let income = posted_total(conn, TransactionKind::Income)?;
                let expense = posted_total(conn, TransactionKind::Expense)?;
                let active_employees: i64 = employees::table
                    .filter(employees::is_active.eq(true))
                    .count()
                    .get_result(conn)?;
                let pending_orders: i64 = purchase_orders::table
                    .filter(purchase_orders::status.eq(OrderStatus::Pending.as_str()))
                    .count()
                    .get_result(conn)?;
                let low_stock_items: i64 = inventory_items::table
                    .filter(inventory_items::current_stock.le(inventory_items::min_stock_alert))
                    .count()
                    .get_result(conn)?;
                let clients: i64 = clients::table.count().get_result(conn)?;
                Ok(DashboardSnapshot {
                    active_projects,
                    total_projects,
                    income,
                    expense,
                    active_employees,
                    pending_orders,
                    low_stock_items,
                    clients,
                })
            })
            .map_err(map_diesel_error)?;
        Ok(snapshot)
    }
}
