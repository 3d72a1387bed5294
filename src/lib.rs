//! # matchbook
//!
//! An in-memory limit order book with price-time priority matching.
//!
//! ## Architecture
//!
//! - **Types**: core data structures ([`Order`], [`Trade`], [`BookError`])
//! - **OrderBook**: two price ladders plus an order registry, built on
//!   slab allocation for O(1) cancel
//! - **Engine**: the crossing loop that turns overlapping bids and asks
//!   into trades
//!
//! ## Design Principles
//!
//! 1. **Single-threaded core**: every mutating call runs to completion
//!    before returning; hosts that need concurrency serialize access
//!    around an owned [`OrderBook`] value
//! 2. **Integer ticks**: prices and quantities are plain `u64`; the
//!    book never touches floating point (see [`types::price`] for
//!    decimal conversion at the edges)
//! 3. **Stable handles**: orders live in a slab arena and price-level
//!    queues link them by slab key, so cancellation from the middle of
//!    a queue is O(1) without pointer aliasing
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderType, Side};
//!
//! let mut book = OrderBook::new();
//!
//! book.submit(Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10)).unwrap();
//! let trades = book.submit(Order::new(OrderType::GoodTillCancel, 2, Side::Sell, 100, 10)).unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].quantity(), 10);
//! assert!(book.is_empty());
//! ```

/// Core data types: Order, Trade, BookError
pub mod types;

/// Order book: price ladders, registry, submit/cancel/modify
pub mod orderbook;

/// Matching engine: the crossing loop
pub mod engine;

pub use types::{BookError, Order, OrderId, OrderType, Price, Quantity, Side, Trade, TradeLeg};
pub use orderbook::{DepthSnapshot, LevelInfo, OrderBook, OrderNode, PriceLevel};
