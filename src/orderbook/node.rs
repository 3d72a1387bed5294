//! Slab-resident order node.
//!
//! `OrderNode` wraps an [`Order`] with doubly-linked queue links so
//! the order can be unlinked from its price level in O(1). The links
//! are slab keys, never references, so there is no aliasing between
//! the registry and the queue: the slab owns the order, everything
//! else holds keys.

use crate::types::{BookError, Order, OrderId, Price, Quantity};

/// An order plus its position in a price level's FIFO queue.
///
/// `next` points toward the tail (newer orders), `prev` toward the
/// head (older orders). An unlinked node belongs to no level.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The order itself
    pub order: Order,

    /// Next (newer) order at the same price, as a slab key
    pub next: Option<usize>,

    /// Previous (older) order at the same price, as a slab key
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Wrap an order, not yet linked into any level.
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// True when the node is not linked into a queue (either side).
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order.id
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.order.price
    }

    #[inline]
    pub fn remaining(&self) -> Quantity {
        self.order.remaining
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }

    /// Fill passthrough; see [`Order::fill`] for the invariant.
    #[inline]
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), BookError> {
        self.order.fill(quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderType, Side};

    fn node(id: OrderId, quantity: Quantity) -> OrderNode {
        OrderNode::new(Order::new(OrderType::GoodTillCancel, id, Side::Buy, 100, quantity))
    }

    #[test]
    fn new_node_is_unlinked() {
        let n = node(1, 10);
        assert!(n.is_unlinked());
        assert_eq!(n.order_id(), 1);
        assert_eq!(n.price(), 100);
        assert_eq!(n.remaining(), 10);
        assert!(!n.is_filled());
    }

    #[test]
    fn linked_node_reports_linked() {
        let mut n = node(1, 10);
        n.prev = Some(3);
        assert!(!n.is_unlinked());
        n.prev = None;
        n.next = Some(5);
        assert!(!n.is_unlinked());
    }

    #[test]
    fn fill_passthrough_propagates_errors() {
        let mut n = node(1, 10);
        n.fill(10).unwrap();
        assert!(n.is_filled());
        assert!(n.fill(1).is_err());
    }
}
