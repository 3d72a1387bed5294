//! Error types for book operations.

use thiserror::Error;

use super::{OrderId, Quantity};

/// Errors surfaced by the order book.
///
/// An unknown order id on cancel or modify is deliberately NOT an
/// error: those operations are idempotent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookError {
    /// A submission reused an identifier that is still live.
    /// Rejected before any mutation, all-or-nothing.
    #[error("order id {id} is already live in the book")]
    DuplicateOrderId {
        /// The offending identifier
        id: OrderId,
    },

    /// A fill was requested for more than an order's remaining
    /// quantity. The matching loop bounds every fill with `min` of
    /// both sides, so this indicates a defect in the engine, not bad
    /// caller input.
    #[error("fill of {requested} exceeds remaining {remaining} on order {id}")]
    InvalidFillQuantity {
        /// Order whose fill was attempted
        id: OrderId,
        /// Quantity the caller asked to fill
        requested: Quantity,
        /// Quantity actually remaining on the order
        remaining: Quantity,
    },
}
