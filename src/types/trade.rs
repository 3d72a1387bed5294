//! Trade types representing executed matches.

use super::{OrderId, Price, Quantity};

/// One side's view of an execution.
///
/// Each leg reports its own order's limit price, not a unified
/// clearing price; when a bid at 105 crosses an ask at 100 the bid leg
/// records 105 and the ask leg records 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeLeg {
    /// Identifier of the participating order
    pub order_id: OrderId,
    /// That order's own limit price
    pub price: Price,
    /// Lots executed in this match
    pub quantity: Quantity,
}

impl TradeLeg {
    /// Notional value of this leg (price x quantity), widened to
    /// avoid overflow.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}

/// A single execution between a resting bid and a resting ask.
///
/// Both legs always carry the same executed quantity. Trades are
/// created by the matching loop and never mutated afterwards; fields
/// are only reachable through accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    bid: TradeLeg,
    ask: TradeLeg,
}

impl Trade {
    /// Build a trade from its two legs. Matching guarantees the legs
    /// carry the same quantity.
    pub(crate) fn new(bid: TradeLeg, ask: TradeLeg) -> Self {
        debug_assert_eq!(bid.quantity, ask.quantity);
        Self { bid, ask }
    }

    /// The buy-side leg
    #[inline]
    pub fn bid(&self) -> &TradeLeg {
        &self.bid
    }

    /// The sell-side leg
    #[inline]
    pub fn ask(&self) -> &TradeLeg {
        &self.ask
    }

    /// Lots transferred between the two orders
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legs_keep_their_own_prices() {
        let trade = Trade::new(
            TradeLeg { order_id: 1, price: 105, quantity: 4 },
            TradeLeg { order_id: 2, price: 100, quantity: 4 },
        );

        assert_eq!(trade.bid().order_id, 1);
        assert_eq!(trade.bid().price, 105);
        assert_eq!(trade.ask().order_id, 2);
        assert_eq!(trade.ask().price, 100);
        assert_eq!(trade.quantity(), 4);
    }

    #[test]
    fn leg_notional() {
        let leg = TradeLeg { order_id: 1, price: u64::MAX, quantity: 2 };
        assert_eq!(leg.notional_raw(), (u64::MAX as u128) * 2);
    }
}
