//! Store and inventory screen: stock register and signed adjustments.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::inventory::{
    InventoryItem, InventoryItemChanges, NewInventoryItem, StockAdjustOutcome,
};
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::InventoryRepository;
use crate::domain::session::Session;

/// Service behind the store and inventory screen.
#[derive(Clone)]
pub struct InventoryService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> InventoryService<R>
where
    R: InventoryRepository,
{
    /// Create an inventory service over the given store.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Register an item with its opening stock.
    pub fn add_item(
        &self,
        session: &Session,
        item: NewInventoryItem,
    ) -> Result<InventoryItem, ModuleError> {
        authorize(session, Screen::Inventory)?;
        require_text("name", &item.name)?;
        if item.current_stock < 0.0 {
            return Err(
                ValidationError::out_of_range("current_stock", "must not be negative").into(),
            );
        }
        Ok(self.repo.insert(&item, self.clock.local().naive_local())?)
    }

    /// The stock register, oldest first.
    pub fn items(&self, session: &Session) -> Result<Vec<InventoryItem>, ModuleError> {
        authorize(session, Screen::Inventory)?;
        Ok(self.repo.list()?)
    }

    /// Apply a signed stock movement and return the updated item.
    ///
    /// A movement that would drive stock negative writes nothing and is
    /// rejected with the quantity actually on hand.
    pub fn adjust_stock(
        &self,
        session: &Session,
        item_id: i32,
        delta: f64,
    ) -> Result<InventoryItem, ModuleError> {
        authorize(session, Screen::Inventory)?;
        let at = self.clock.local().naive_local();
        match self.repo.adjust_stock(item_id, delta, at)? {
            StockAdjustOutcome::Adjusted(item) => Ok(item),
            StockAdjustOutcome::Rejected { current_stock } => {
                Err(ValidationError::out_of_range(
                    "quantity",
                    format!("would drive stock below zero; only {current_stock} on hand"),
                )
                .into())
            }
        }
    }

    /// Update an item's master data; stock moves only through adjustments.
    pub fn update_item(
        &self,
        session: &Session,
        item_id: i32,
        changes: InventoryItemChanges,
    ) -> Result<InventoryItem, ModuleError> {
        authorize(session, Screen::Inventory)?;
        Ok(self.repo.update(item_id, &changes)?)
    }

    /// Remove an item permanently.
    pub fn remove_item(&self, session: &Session, item_id: i32) -> Result<(), ModuleError> {
        authorize(session, Screen::Inventory)?;
        Ok(self.repo.delete(item_id)?)
    }

    /// Items at or below their reorder threshold.
    pub fn low_stock(&self, session: &Session) -> Result<Vec<InventoryItem>, ModuleError> {
        authorize(session, Screen::Inventory)?;
        let items = self.repo.list()?;
        Ok(items.into_iter().filter(InventoryItem::is_low_stock).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MemoryInventoryRepository;
    use crate::domain::user::Role;
    use crate::test_support::{fixture_clock, fixture_now, session_as};

    #[fixture]
    fn service() -> InventoryService<MemoryInventoryRepository> {
        InventoryService::new(Arc::new(MemoryInventoryRepository::new()), fixture_clock())
    }

    fn cement(opening: f64) -> NewInventoryItem {
        let mut item = NewInventoryItem::new("OPC 53 Cement");
        item.current_stock = opening;
        item
    }

    #[rstest]
    fn added_items_are_stamped_with_the_clock(
        service: InventoryService<MemoryInventoryRepository>,
    ) {
        let session = session_as(Role::Owner);
        let stored = service.add_item(&session, cement(40.0)).unwrap();
        assert_eq!(stored.last_updated, fixture_now());
    }

    #[rstest]
    fn negative_opening_stock_is_rejected(service: InventoryService<MemoryInventoryRepository>) {
        let session = session_as(Role::Owner);
        assert!(service.add_item(&session, cement(-1.0)).is_err());
    }

    #[rstest]
    fn overdrawing_writes_nothing_and_reports_the_balance(
        service: InventoryService<MemoryInventoryRepository>,
    ) {
        let session = session_as(Role::Owner);
        let stored = service.add_item(&session, cement(10.0)).unwrap();

        let error = service.adjust_stock(&session, stored.id, -12.0).unwrap_err();
        assert!(matches!(error, ModuleError::Validation(_)));

        let items = service.items(&session).unwrap();
        assert!((items[0].current_stock - 10.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn an_exact_drain_to_zero_is_allowed(service: InventoryService<MemoryInventoryRepository>) {
        let session = session_as(Role::Owner);
        let stored = service.add_item(&session, cement(10.0)).unwrap();

        let drained = service.adjust_stock(&session, stored.id, -10.0).unwrap();
        assert!((drained.current_stock - 0.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn low_stock_includes_the_threshold_itself(
        service: InventoryService<MemoryInventoryRepository>,
    ) {
        let session = session_as(Role::Owner);
        // Default reorder threshold is 10.
        service.add_item(&session, cement(10.0)).unwrap();
        service.add_item(&session, cement(200.0)).unwrap();

        let low = service.low_stock(&session).unwrap();
        assert_eq!(low.len(), 1);
        assert!((low[0].current_stock - 10.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn adjusting_an_unknown_item_reports_not_found(
        service: InventoryService<MemoryInventoryRepository>,
    ) {
        let session = session_as(Role::Owner);
        let error = service.adjust_stock(&session, 42, 1.0).unwrap_err();
        assert_eq!(error, ModuleError::not_found("inventory item", 42));
    }

    #[rstest]
    fn only_owners_reach_the_store(service: InventoryService<MemoryInventoryRepository>) {
        let session = session_as(Role::AccountingStaff);
        let error = service.items(&session).unwrap_err();
        assert_eq!(error, ModuleError::access_denied("Store & Inventory"));
    }
}
