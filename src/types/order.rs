//! Order types for the matching engine.

use tracing::error;

use super::{BookError, OrderId, Price, Quantity};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy order (bid) - rests in the descending ladder
    Buy,
    /// Sell order (ask) - rests in the ascending ladder
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// How an order behaves when it cannot match immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// Rests in the book until filled or explicitly canceled.
    GoodTillCancel,
    /// Must execute immediately against the current book; any
    /// unmatched remainder is canceled rather than left resting.
    FillAndKill,
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order and its fill state.
///
/// `remaining` starts equal to `quantity` and only ever decreases,
/// through [`Order::fill`]. The order is *filled* once `remaining`
/// reaches zero.
///
/// ## Example
///
/// ```
/// use matchbook::{Order, OrderType, Side};
///
/// let order = Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10);
/// assert_eq!(order.remaining, 10);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Caller-assigned identifier, unique while live
    pub id: OrderId,

    /// GoodTillCancel or FillAndKill
    pub order_type: OrderType,

    /// Buy or Sell
    pub side: Side,

    /// Limit price in ticks
    pub price: Price,

    /// Original quantity in lots
    pub quantity: Quantity,

    /// Quantity not yet executed; decremented by fills
    pub remaining: Quantity,
}

impl Order {
    /// Create a new order with nothing filled yet.
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            order_type,
            side,
            price,
            quantity,
            remaining: quantity,
        }
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Quantity executed so far
    #[inline]
    pub fn filled_quantity(&self) -> Quantity {
        self.quantity - self.remaining
    }

    /// Execute `quantity` lots against this order.
    ///
    /// The matching loop always bounds fills by `min` of both sides'
    /// remaining quantities, so a request exceeding `remaining` is an
    /// internal invariant breach: it is logged, returned as
    /// [`BookError::InvalidFillQuantity`], and nothing is mutated.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), BookError> {
        if quantity > self.remaining {
            error!(
                id = self.id,
                requested = quantity,
                remaining = self.remaining,
                "fill exceeds remaining quantity"
            );
            return Err(BookError::InvalidFillQuantity {
                id: self.id,
                requested: quantity,
                remaining: self.remaining,
            });
        }
        self.remaining -= quantity;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn new_order_is_unfilled() {
        let order = Order::new(OrderType::GoodTillCancel, 1, Side::Buy, 100, 10);

        assert_eq!(order.id, 1);
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.order_type, OrderType::GoodTillCancel);
        assert_eq!(order.price, 100);
        assert_eq!(order.quantity, 10);
        assert_eq!(order.remaining, 10);
        assert_eq!(order.filled_quantity(), 0);
        assert!(!order.is_filled());
    }

    #[test]
    fn partial_then_full_fill() {
        let mut order = Order::new(OrderType::GoodTillCancel, 1, Side::Sell, 100, 10);

        order.fill(4).unwrap();
        assert_eq!(order.remaining, 6);
        assert_eq!(order.filled_quantity(), 4);
        assert!(!order.is_filled());

        order.fill(6).unwrap();
        assert_eq!(order.remaining, 0);
        assert!(order.is_filled());
    }

    #[test]
    fn overfill_is_rejected_without_mutation() {
        let mut order = Order::new(OrderType::GoodTillCancel, 7, Side::Buy, 100, 10);

        let err = order.fill(11).unwrap_err();
        assert_eq!(
            err,
            BookError::InvalidFillQuantity {
                id: 7,
                requested: 11,
                remaining: 10,
            }
        );
        // no partial effect
        assert_eq!(order.remaining, 10);
    }

    #[test]
    fn fill_of_exact_remainder_is_allowed() {
        let mut order = Order::new(OrderType::FillAndKill, 1, Side::Buy, 100, 10);
        order.fill(10).unwrap();
        assert!(order.is_filled());

        // a filled order accepts a zero fill and nothing else
        order.fill(0).unwrap();
        assert!(order.fill(1).is_err());
    }
}
