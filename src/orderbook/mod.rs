//! Order book: price ladders, registry, and the public mutation API.
//!
//! ## Architecture
//!
//! - **Slab arena**: every live order sits in one [`slab::Slab`] slot;
//!   the slab key is a stable handle valid until removal
//! - **Price ladders**: `BTreeMap` per side, bids keyed descending and
//!   asks ascending, so the first entry is always top of book
//! - **Registry**: `HashMap` from order id to slab key, giving O(1)
//!   cancel without scanning a queue
//!
//! ## Components
//!
//! - [`OrderNode`]: an [`crate::Order`] plus intrusive queue links
//! - [`PriceLevel`]: FIFO queue metadata for one price
//! - [`OrderBook`]: the two ladders plus the registry
//!
//! ## Complexity
//!
//! | Operation            | Cost                      |
//! |----------------------|---------------------------|
//! | submit               | O(log L) + O(k) matched   |
//! | cancel by id         | O(1) (+ level cleanup)    |
//! | best bid/ask         | O(log L)                  |
//! | depth snapshot       | O(L)                      |
//!
//! L = price levels on a side, k = opposing orders drained.

pub mod node;
pub mod level;
pub mod book;

pub use node::OrderNode;
pub use level::PriceLevel;
pub use book::{DepthSnapshot, LevelInfo, OrderBook};
