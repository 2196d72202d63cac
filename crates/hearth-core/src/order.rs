//! # Order Book
//!
//! Every placed order, in the order it was placed, with the status rules
//! applied on every change.
//!
//! ## Status Changes
//! ```text
//! cancel(id)              set_status(id, s)
//!     │                        │
//!     ▼                        ▼
//! ┌────────────────────────────────────────────────┐
//! │ OrderStatus::can_transition_to (single guard)  │
//! └────────────────────────────────────────────────┘
//!     │ allowed                │ rejected
//!     ▼                        ▼
//! status updated          CoreError::InvalidOrderTransition
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Order, OrderStatus};

/// A fresh order id.
///
/// ## Example
/// ```rust
/// use hearth_core::order::new_order_id;
///
/// assert_ne!(new_order_id(), new_order_id());
/// ```
pub fn new_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// The result of a cancel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Processing order moved to Cancelled.
    Cancelled,
    /// The order was already cancelled; nothing changed.
    AlreadyCancelled,
    /// No order with that id; nothing changed.
    NotFound,
}

/// Every order, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderBook {
    pub orders: Vec<Order>,
}

impl OrderBook {
    pub fn new(orders: Vec<Order>) -> Self {
        OrderBook { orders }
    }

    /// Appends an order.
    pub fn add(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Orders of one user, in insertion order.
    pub fn user_orders(&self, user_id: &str) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.user_id == user_id).collect()
    }

    /// Looks an order up by id.
    pub fn track(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Cancels a processing order.
    ///
    /// ## Behavior
    /// - Processing: moves to Cancelled
    /// - Already Cancelled: no-op
    /// - Unknown id: no-op
    /// - Shipped or Delivered: [`CoreError::InvalidOrderTransition`], nothing
    ///   changes
    pub fn cancel(&mut self, order_id: &str) -> CoreResult<CancelOutcome> {
        let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) else {
            return Ok(CancelOutcome::NotFound);
        };

        if order.status == OrderStatus::Cancelled {
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        transition(order, OrderStatus::Cancelled)?;
        Ok(CancelOutcome::Cancelled)
    }

    /// Moves an order to a new status along the state machine.
    ///
    /// Setting the status an order already has is a no-op.
    pub fn set_status(&mut self, order_id: &str, status: OrderStatus) -> CoreResult<&Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        if order.status != status {
            transition(order, status)?;
        }
        Ok(&*order)
    }

    /// Drops every order.
    pub fn clear(&mut self) {
        self.orders.clear();
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Σ order totals, the admin dashboard's revenue figure.
    pub fn total_revenue(&self) -> Money {
        self.orders.iter().map(|o| o.total).sum()
    }
}

fn transition(order: &mut Order, to: OrderStatus) -> CoreResult<()> {
    if !order.status.can_transition_to(to) {
        return Err(CoreError::InvalidOrderTransition {
            order_id: order.id.clone(),
            from: order.status,
            to,
        });
    }
    order.status = to;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn book() -> OrderBook {
        OrderBook::new(seed::orders())
    }

    fn status_of(book: &OrderBook, id: &str) -> OrderStatus {
        book.track(id).map(|o| o.status).unwrap()
    }

    #[test]
    fn test_user_orders_preserve_insertion_order() {
        let book = book();
        let ids: Vec<&str> = book.user_orders("1").iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["order1", "order2", "order3", "order4", "order5"]);
        assert!(book.user_orders("2").is_empty());
    }

    #[test]
    fn test_add_appends() {
        let mut book = book();
        let mut order = seed::orders().remove(0);
        order.id = new_order_id();
        order.user_id = "2".to_string();

        book.add(order.clone());
        assert_eq!(book.orders.last(), Some(&order));
        assert_eq!(book.user_orders("2").len(), 1);
    }

    #[test]
    fn test_cancel_processing_only_touches_target() {
        let mut book = book();
        let before = book.clone();

        assert_eq!(book.cancel("order2").unwrap(), CancelOutcome::Cancelled);
        assert_eq!(status_of(&book, "order2"), OrderStatus::Cancelled);

        for (a, b) in book.orders.iter().zip(before.orders.iter()) {
            if a.id != "order2" {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_cancel_absent_and_repeat_are_noops() {
        let mut book = book();
        let before = book.clone();

        assert_eq!(book.cancel("nope").unwrap(), CancelOutcome::NotFound);
        assert_eq!(book.cancel("order4").unwrap(), CancelOutcome::AlreadyCancelled);
        assert_eq!(book, before);
    }

    #[test]
    fn test_cancel_shipped_or_delivered_rejected() {
        let mut book = book();

        assert!(matches!(
            book.cancel("order3"),
            Err(CoreError::InvalidOrderTransition { from: OrderStatus::Shipped, .. })
        ));
        assert!(matches!(
            book.cancel("order1"),
            Err(CoreError::InvalidOrderTransition { from: OrderStatus::Delivered, .. })
        ));
        assert_eq!(status_of(&book, "order3"), OrderStatus::Shipped);
    }

    #[test]
    fn test_set_status_follows_state_machine() {
        let mut book = book();

        book.set_status("order5", OrderStatus::Shipped).unwrap();
        book.set_status("order5", OrderStatus::Delivered).unwrap();
        assert_eq!(status_of(&book, "order5"), OrderStatus::Delivered);

        // Same status is a no-op
        assert!(book.set_status("order5", OrderStatus::Delivered).is_ok());

        assert!(book.set_status("order5", OrderStatus::Processing).is_err());
        assert!(matches!(
            book.set_status("missing", OrderStatus::Shipped),
            Err(CoreError::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_total_revenue_and_clear() {
        let mut book = book();
        assert_eq!(
            book.total_revenue(),
            Money::from_units(84700 + 47880 + 94998 + 134997 + 31995)
        );

        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.total_revenue(), Money::zero());
    }
}
