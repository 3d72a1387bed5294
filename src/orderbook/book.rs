//! The order book: two price ladders, an order registry, and the
//! submit/cancel/modify API.
//!
//! ## Ownership model
//!
//! The slab owns every live order. The price levels and the registry
//! hold slab keys, never references, so the same order can be reached
//! from its ladder position and from its id without aliasing. A key is
//! freed only when its order leaves the book (filled or canceled).
//!
//! ## Invariants
//!
//! - an id is in the registry iff the order is resting in a ladder
//! - a level exists in a ladder iff its queue is non-empty
//! - after any `submit` returns, best bid < best ask (no resting cross)
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderType, Side};
//!
//! let mut book = OrderBook::new();
//! book.submit(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(100));
//! assert_eq!(book.len(), 1);
//!
//! book.cancel(1);
//! assert!(book.is_empty());
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use slab::Slab;
use tracing::debug;

use crate::engine;
use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{BookError, Order, OrderId, OrderType, Price, Quantity, Side, Trade};

/// Aggregated view of one price level: price and the total remaining
/// quantity resting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

/// Per-side depth, best-to-worst: bids descending, asks ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthSnapshot {
    pub bids: Vec<LevelInfo>,
    pub asks: Vec<LevelInfo>,
}

/// A two-sided limit order book with price-time priority.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// Arena holding every live order
    pub(crate) orders: Slab<OrderNode>,

    /// Bid ladder, highest price first
    pub(crate) bids: BTreeMap<Reverse<Price>, PriceLevel>,

    /// Ask ladder, lowest price first
    pub(crate) asks: BTreeMap<Price, PriceLevel>,

    /// Registry: live order id -> slab key
    pub(crate) order_index: HashMap<OrderId, usize>,
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with `order_capacity` slab slots pre-allocated.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Submit / Cancel / Modify
    // ========================================================================

    /// Submit an order, run matching, and return the resulting trades.
    ///
    /// Rejects with [`BookError::DuplicateOrderId`] if the id is
    /// already live, before any state changes. A
    /// [`OrderType::FillAndKill`] order that cannot cross the opposite
    /// best price is dropped without resting and yields no trades.
    pub fn submit(&mut self, order: Order) -> Result<Vec<Trade>, BookError> {
        if self.order_index.contains_key(&order.id) {
            return Err(BookError::DuplicateOrderId { id: order.id });
        }

        if order.order_type == OrderType::FillAndKill
            && !self.can_match(order.side, order.price)
        {
            debug!(id = order.id, "fill-and-kill cannot cross, dropped");
            return Ok(Vec::new());
        }

        let (id, side, price) = (order.id, order.side, order.price);
        let key = self.orders.insert(OrderNode::new(order));
        self.order_index.insert(id, key);

        match side {
            Side::Buy => self
                .bids
                .entry(Reverse(price))
                .or_insert_with(|| PriceLevel::new(price))
                .push_back(key, &mut self.orders),
            Side::Sell => self
                .asks
                .entry(price)
                .or_insert_with(|| PriceLevel::new(price))
                .push_back(key, &mut self.orders),
        }

        debug!(id, ?side, price, "order accepted");
        engine::uncross(self)
    }

    /// Cancel a live order by id and return it.
    ///
    /// Unknown ids are a no-op (`None`), so cancellation is
    /// idempotent.
    pub fn cancel(&mut self, id: OrderId) -> Option<Order> {
        let key = self.order_index.remove(&id)?;
        let order = self.unlink_and_free(key);
        debug!(id, "order canceled");
        Some(order)
    }

    /// Replace a live order: atomic cancel plus a fresh submission
    /// keeping the original order type but taking the new side, price
    /// and quantity. Trades from the re-submission are returned.
    ///
    /// An unknown id is a no-op returning no trades.
    pub fn modify(
        &mut self,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Vec<Trade>, BookError> {
        let Some(&key) = self.order_index.get(&id) else {
            return Ok(Vec::new());
        };
        let order_type = self
            .orders
            .get(key)
            .expect("registry points at a vacant slot")
            .order
            .order_type;

        self.cancel(id);
        debug!(id, "order replaced");
        self.submit(Order::new(order_type, id, side, price, quantity))
    }

    /// Unlink `key` from its price level, drop the level if it
    /// empties, and free the slab slot. The registry entry must
    /// already be gone.
    fn unlink_and_free(&mut self, key: usize) -> Order {
        let (price, side) = {
            let node = self
                .orders
                .get(key)
                .expect("registry points at a vacant slot");
            (node.price(), node.order.side)
        };

        match side {
            Side::Buy => {
                let emptied = if let Some(level) = self.bids.get_mut(&Reverse(price)) {
                    level.remove(key, &mut self.orders);
                    level.is_empty()
                } else {
                    false
                };
                if emptied {
                    self.bids.remove(&Reverse(price));
                }
            }
            Side::Sell => {
                let emptied = if let Some(level) = self.asks.get_mut(&price) {
                    level.remove(key, &mut self.orders);
                    level.is_empty()
                } else {
                    false
                };
                if emptied {
                    self.asks.remove(&price);
                }
            }
        }

        self.orders.remove(key).order
    }

    /// Whether an order on `side` at `price` would cross the opposite
    /// best. Used to drop fill-and-kill orders that would otherwise
    /// rest.
    fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.best_ask().is_some_and(|ask| price >= ask),
            Side::Sell => self.best_bid().is_some_and(|bid| price <= bid),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of live orders (registry size).
    #[inline]
    pub fn len(&self) -> usize {
        self.order_index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_index.is_empty()
    }

    /// Pre-allocated slab capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of distinct bid prices.
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of distinct ask prices.
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    /// Highest resting buy price.
    #[inline]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next().map(|r| r.0)
    }

    /// Lowest resting sell price.
    #[inline]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Best ask minus best bid; `None` when either side is empty.
    /// Never negative: matching removes any cross before returning.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Whether `id` is currently live.
    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.order_index.contains_key(&id)
    }

    /// Read a live order by id.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        let key = *self.order_index.get(&id)?;
        self.orders.get(key).map(|node| &node.order)
    }

    /// Aggregate remaining quantity per price, both sides, each in
    /// best-to-worst order. Read-only.
    pub fn depth(&self) -> DepthSnapshot {
        let collect = |levels: &PriceLevel| LevelInfo {
            price: levels.price,
            quantity: levels.total_quantity,
        };
        DepthSnapshot {
            bids: self.bids.values().map(collect).collect(),
            asks: self.asks.values().map(collect).collect(),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
