//! Price level: the FIFO queue of orders resting at one price.
//!
//! ## Queue structure
//!
//! ```text
//! head (oldest) <-> ... <-> tail (newest)
//! ```
//!
//! The level holds only queue metadata; the orders themselves live in
//! the book's slab and are linked by slab key. New arrivals append at
//! the tail, matching consumes from the head, and any order can be
//! unlinked in O(1) given its key.
//!
//! A level never exists empty inside a ladder: the book creates it on
//! first insert and deletes it the moment its last order leaves.

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::{Price, Quantity};

/// Queue metadata for all orders resting at a single price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price shared by every order in this queue
    pub price: Price,

    /// Sum of `remaining` across queued orders, kept in lockstep with
    /// fills and removals so depth snapshots are O(1) per level
    pub total_quantity: Quantity,

    /// Oldest order (matched first), as a slab key
    pub head: Option<usize>,

    /// Newest order (arrivals append here), as a slab key
    pub tail: Option<usize>,

    /// Number of queued orders
    pub order_count: usize,
}

impl PriceLevel {
    /// Create an empty level for `price`.
    pub fn new(price: Price) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order at the tail, preserving arrival order.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("invalid slab key");
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = slab.get_mut(tail_key).expect("invalid tail key");
            tail_node.next = Some(key);
        } else {
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += quantity;
    }

    /// Unlink an order from anywhere in the queue in O(1).
    ///
    /// Returns the unlinked order's remaining quantity, which is also
    /// subtracted from the level total. The slab slot itself is left
    /// for the caller to free.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> Quantity {
        let node = slab.get(key).expect("invalid slab key");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            slab.get_mut(prev).expect("invalid prev key").next = next_key;
        } else {
            self.head = next_key;
        }

        if let Some(next) = next_key {
            slab.get_mut(next).expect("invalid next key").prev = prev_key;
        } else {
            self.tail = prev_key;
        }

        let node = slab.get_mut(key).expect("invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= quantity;

        quantity
    }

    /// Oldest order in the queue, the next to match at this price.
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Account for a partial fill of a queued order.
    pub fn reduce_quantity(&mut self, filled: Quantity) {
        self.total_quantity -= filled;
    }

    /// Walk the queue head to tail.
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            next: self.head,
        }
    }
}

/// Iterator over a level's queue in arrival order.
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    next: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = (usize, &'a OrderNode);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.next?;
        let node = self.slab.get(key).expect("invalid slab key");
        self.next = node.next;
        Some((key, node))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Order, OrderType, Side};

    fn insert_node(slab: &mut Slab<OrderNode>, id: u64, quantity: u64) -> usize {
        let order = Order::new(OrderType::GoodTillCancel, id, Side::Buy, 100, quantity);
        slab.insert(OrderNode::new(order))
    }

    #[test]
    fn empty_level() {
        let level = PriceLevel::new(100);

        assert_eq!(level.price, 100);
        assert_eq!(level.total_quantity, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert!(level.is_empty());
        assert!(level.peek_head().is_none());
    }

    #[test]
    fn push_single() {
        let mut slab = Slab::new();
        let mut level = PriceLevel::new(100);

        let key = insert_node(&mut slab, 1, 10);
        level.push_back(key, &mut slab);

        assert_eq!(level.order_count, 1);
        assert_eq!(level.total_quantity, 10);
        assert_eq!(level.head, Some(key));
        assert_eq!(level.tail, Some(key));
        assert!(slab[key].is_unlinked());
    }

    #[test]
    fn push_preserves_arrival_order() {
        let mut slab = Slab::new();
        let mut level = PriceLevel::new(100);

        let k1 = insert_node(&mut slab, 1, 10);
        let k2 = insert_node(&mut slab, 2, 20);
        let k3 = insert_node(&mut slab, 3, 30);

        level.push_back(k1, &mut slab);
        level.push_back(k2, &mut slab);
        level.push_back(k3, &mut slab);

        assert_eq!(level.order_count, 3);
        assert_eq!(level.total_quantity, 60);
        assert_eq!(level.head, Some(k1));
        assert_eq!(level.tail, Some(k3));

        let ids: Vec<u64> = level.iter(&slab).map(|(_, n)| n.order_id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn remove_middle_relinks_neighbors() {
        let mut slab = Slab::new();
        let mut level = PriceLevel::new(100);

        let k1 = insert_node(&mut slab, 1, 10);
        let k2 = insert_node(&mut slab, 2, 20);
        let k3 = insert_node(&mut slab, 3, 30);
        level.push_back(k1, &mut slab);
        level.push_back(k2, &mut slab);
        level.push_back(k3, &mut slab);

        let removed = level.remove(k2, &mut slab);

        assert_eq!(removed, 20);
        assert_eq!(level.order_count, 2);
        assert_eq!(level.total_quantity, 40);
        assert_eq!(slab[k1].next, Some(k3));
        assert_eq!(slab[k3].prev, Some(k1));
        assert!(slab[k2].is_unlinked());
    }

    #[test]
    fn remove_head_and_tail() {
        let mut slab = Slab::new();
        let mut level = PriceLevel::new(100);

        let k1 = insert_node(&mut slab, 1, 10);
        let k2 = insert_node(&mut slab, 2, 20);
        let k3 = insert_node(&mut slab, 3, 30);
        level.push_back(k1, &mut slab);
        level.push_back(k2, &mut slab);
        level.push_back(k3, &mut slab);

        level.remove(k1, &mut slab);
        assert_eq!(level.head, Some(k2));

        level.remove(k3, &mut slab);
        assert_eq!(level.head, Some(k2));
        assert_eq!(level.tail, Some(k2));
        assert!(slab[k2].is_unlinked());
    }

    #[test]
    fn remove_last_order_empties_level() {
        let mut slab = Slab::new();
        let mut level = PriceLevel::new(100);

        let key = insert_node(&mut slab, 1, 10);
        level.push_back(key, &mut slab);
        level.remove(key, &mut slab);

        assert!(level.is_empty());
        assert_eq!(level.total_quantity, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
    }

    #[test]
    fn reduce_quantity_tracks_partial_fills() {
        let mut slab = Slab::new();
        let mut level = PriceLevel::new(100);

        let key = insert_node(&mut slab, 1, 10);
        level.push_back(key, &mut slab);

        slab[key].fill(4).unwrap();
        level.reduce_quantity(4);

        assert_eq!(level.total_quantity, 6);
        // removing the order subtracts what is left, not the original
        assert_eq!(level.remove(key, &mut slab), 6);
        assert_eq!(level.total_quantity, 0);
    }
}
