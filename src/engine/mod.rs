//! Matching engine: the crossing loop.
//!
//! ## Matching Rules
//!
//! - a *cross* exists while best bid >= best ask
//! - within a price level, strict FIFO: the oldest order matches first
//! - each match executes `min` of the two heads' remaining quantities
//! - filled heads leave the book immediately; emptied levels are
//!   deleted before the next top-of-book comparison
//! - a fill-and-kill remainder left at the top of either ladder after
//!   the loop is canceled rather than allowed to rest
//!
//! [`uncross`] is invoked by [`crate::OrderBook::submit`] after every
//! successful insert; it is exposed publicly because running it on an
//! already-uncrossed book is a harmless no-op.

mod matcher;

pub use matcher::uncross;
