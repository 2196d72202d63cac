//! # Order State
//!
//! The order history, seeded with the mock orders on first run.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order ──► add()            ──┐                                   │
//! │  "Cancel"    ──► cancel()           ├──► OrderBook ──► order-storage     │
//! │  admin panel ──► set_status()     ──┘   (Arc<Mutex>)   (on success)     │
//! │                                                                         │
//! │  "My orders" ──► user_orders()  (read only, insertion order)           │
//! │  "Track"     ──► track()        (read only)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use hearth_core::order::{CancelOutcome, OrderBook};
use hearth_core::{seed, CoreResult, Money, Order, OrderStatus};
use hearth_store::{SnapshotRepository, Storage};
use tracing::{debug, info, warn};

use super::lock;

#[derive(Debug, Clone)]
pub struct OrderState {
    book: Arc<Mutex<OrderBook>>,
    repo: SnapshotRepository<OrderBook>,
}

impl OrderState {
    /// Restores saved orders, or seeds the mock history.
    pub fn restore(storage: &Storage) -> Self {
        let repo = storage.orders();
        let book = repo.restore(|| OrderBook::new(seed::orders()));
        debug!(orders = book.len(), "Orders restored");
        OrderState {
            book: Arc::new(Mutex::new(book)),
            repo,
        }
    }

    fn persist(&self, book: &OrderBook) {
        if let Err(e) = self.repo.save(book) {
            warn!(error = %e, "Failed to persist orders");
        }
    }

    pub fn add(&self, order: Order) {
        info!(order_id = %order.id, user_id = %order.user_id, total = %order.total, "Order added");
        let mut book = lock(&self.book);
        book.add(order);
        self.persist(&book);
    }

    /// Cancels a Processing order. Unknown ids and already-cancelled
    /// orders are no-ops; shipped or delivered orders are rejected.
    pub fn cancel(&self, order_id: &str) -> CoreResult<CancelOutcome> {
        let mut book = lock(&self.book);
        let outcome = book.cancel(order_id)?;
        debug!(order_id, ?outcome, "Order cancel");
        if outcome == CancelOutcome::Cancelled {
            self.persist(&book);
        }
        Ok(outcome)
    }

    /// Moves an order along the status state machine.
    pub fn set_status(&self, order_id: &str, status: OrderStatus) -> CoreResult<Order> {
        let mut book = lock(&self.book);
        let order = book.set_status(order_id, status)?.clone();
        debug!(order_id, %status, "Order status set");
        self.persist(&book);
        Ok(order)
    }

    /// Orders placed by `user_id`, oldest first.
    pub fn user_orders(&self, user_id: &str) -> Vec<Order> {
        lock(&self.book)
            .user_orders(user_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn track(&self, order_id: &str) -> Option<Order> {
        lock(&self.book).track(order_id).cloned()
    }

    pub fn all(&self) -> Vec<Order> {
        lock(&self.book).orders.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.book).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.book).is_empty()
    }

    pub fn total_revenue(&self) -> Money {
        lock(&self.book).total_revenue()
    }

    pub fn clear(&self) {
        let mut book = lock(&self.book);
        book.clear();
        self.persist(&book);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::CoreError;

    #[test]
    fn test_first_run_is_seeded() {
        let orders = OrderState::restore(&Storage::in_memory());
        assert_eq!(orders.len(), seed::orders().len());
        assert!(orders.track("order1").is_some());
    }

    #[test]
    fn test_cancel_persists_only_real_changes() {
        let storage = Storage::in_memory();
        let orders = OrderState::restore(&storage);

        assert_eq!(orders.cancel("missing").unwrap(), CancelOutcome::NotFound);
        assert_eq!(storage.orders().load().unwrap(), None);

        assert_eq!(orders.cancel("order2").unwrap(), CancelOutcome::Cancelled);
        let saved = storage.orders().load().unwrap().unwrap();
        assert_eq!(
            saved.track("order2").map(|o| o.status),
            Some(OrderStatus::Cancelled)
        );
    }

    #[test]
    fn test_cancel_shipped_is_rejected() {
        let orders = OrderState::restore(&Storage::in_memory());
        let err = orders.cancel("order3").unwrap_err();
        assert!(matches!(err, CoreError::InvalidOrderTransition { .. }));
        assert_eq!(orders.track("order3").map(|o| o.status), Some(OrderStatus::Shipped));
    }

    #[test]
    fn test_user_orders_survive_reopen() {
        let storage = Storage::in_memory();
        let orders = OrderState::restore(&storage);
        let before = orders.user_orders("1");

        orders.set_status("order2", OrderStatus::Shipped).unwrap();

        let reopened = OrderState::restore(&storage);
        let after = reopened.user_orders("1");
        assert_eq!(after.len(), before.len());
        assert_eq!(
            reopened.track("order2").map(|o| o.status),
            Some(OrderStatus::Shipped)
        );
    }
}
