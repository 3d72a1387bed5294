//! Core data types for the order book.
//!
//! Prices and quantities are plain integer ticks. The book imposes no
//! scale of its own; hosts that quote in decimals can convert at the
//! boundary with the helpers in [`price`].
//!
//! ## Types
//!
//! - [`Order`]: a limit order and its fill state
//! - [`Side`]: Buy or Sell
//! - [`OrderType`]: GoodTillCancel or FillAndKill
//! - [`Trade`]: one executed match, a bid leg and an ask leg
//! - [`BookError`]: structured rejection and invariant-breach errors

mod error;
mod order;
mod trade;
pub mod price;

pub use error::BookError;
pub use order::{Order, OrderType, Side};
pub use trade::{Trade, TradeLeg};

/// Caller-assigned order identifier, unique while the order is live.
pub type OrderId = u64;

/// Limit price in integer ticks.
pub type Price = u64;

/// Quantity in integer lots.
pub type Quantity = u64;
