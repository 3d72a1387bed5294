//! Price-time priority matching over a crossed book.

use std::cmp::Reverse;

use tracing::{debug, trace};

use crate::orderbook::OrderBook;
use crate::types::{BookError, OrderId, OrderType, Price, Quantity, Side, Trade, TradeLeg};

/// Match away any cross between the two ladders and return the trades
/// executed, oldest first.
///
/// The loop repeats while both ladders are non-empty and best bid >=
/// best ask: the two best levels are drained head against head, each
/// match transferring `min` of the heads' remaining quantities. Every
/// trade carries a bid leg and an ask leg, each priced at that order's
/// own limit, with equal executed quantities.
///
/// After the loop, a fill-and-kill order left at the head of either
/// ladder is canceled; it can no longer cross, and such orders never
/// rest.
///
/// # Errors
///
/// [`BookError::InvalidFillQuantity`] can only arise from a defect in
/// this loop's own quantity computation; it is propagated rather than
/// swallowed so the host fails loudly.
pub fn uncross(book: &mut OrderBook) -> Result<Vec<Trade>, BookError> {
    let mut trades = Vec::new();

    loop {
        let (Some(bid_price), Some(ask_price)) = (book.best_bid(), book.best_ask()) else {
            break;
        };
        if bid_price < ask_price {
            break;
        }

        // Drain the two best levels head against head. Either level
        // emptying ends the inner loop; the outer loop then re-reads
        // the (possibly changed) top of book.
        loop {
            let Some(bid_key) = book
                .bids
                .get(&Reverse(bid_price))
                .and_then(|level| level.peek_head())
            else {
                break;
            };
            let Some(ask_key) = book
                .asks
                .get(&ask_price)
                .and_then(|level| level.peek_head())
            else {
                break;
            };

            let (bid_id, bid_remaining) = {
                let node = book.orders.get(bid_key).expect("level head vacant in slab");
                (node.order_id(), node.remaining())
            };
            let (ask_id, ask_remaining) = {
                let node = book.orders.get(ask_key).expect("level head vacant in slab");
                (node.order_id(), node.remaining())
            };

            let executed = bid_remaining.min(ask_remaining);

            book.orders
                .get_mut(bid_key)
                .expect("level head vacant in slab")
                .fill(executed)?;
            book.orders
                .get_mut(ask_key)
                .expect("level head vacant in slab")
                .fill(executed)?;

            settle_head(book, Side::Buy, bid_price, bid_key, bid_id, executed);
            settle_head(book, Side::Sell, ask_price, ask_key, ask_id, executed);

            trace!(bid = bid_id, ask = ask_id, quantity = executed, "trade");
            trades.push(Trade::new(
                TradeLeg { order_id: bid_id, price: bid_price, quantity: executed },
                TradeLeg { order_id: ask_id, price: ask_price, quantity: executed },
            ));
        }
    }

    cancel_unmatched_fill_and_kill(book);

    Ok(trades)
}

/// Post-fill bookkeeping for one head order: adjust the level total,
/// and if the order filled, pop it from the queue, the registry, and
/// the slab. Deletes the level if it emptied.
fn settle_head(
    book: &mut OrderBook,
    side: Side,
    price: Price,
    key: usize,
    id: OrderId,
    executed: Quantity,
) {
    let filled = book
        .orders
        .get(key)
        .expect("level head vacant in slab")
        .is_filled();

    // `PriceLevel::remove` subtracts the order's remaining quantity,
    // which is already zero for a filled head, so the level total is
    // adjusted by `executed` exactly once either way.
    match side {
        Side::Buy => {
            let emptied = {
                let level = book
                    .bids
                    .get_mut(&Reverse(price))
                    .expect("crossed bid level vanished");
                level.reduce_quantity(executed);
                if filled {
                    level.remove(key, &mut book.orders);
                }
                level.is_empty()
            };
            if emptied {
                book.bids.remove(&Reverse(price));
            }
        }
        Side::Sell => {
            let emptied = {
                let level = book
                    .asks
                    .get_mut(&price)
                    .expect("crossed ask level vanished");
                level.reduce_quantity(executed);
                if filled {
                    level.remove(key, &mut book.orders);
                }
                level.is_empty()
            };
            if emptied {
                book.asks.remove(&price);
            }
        }
    }

    if filled {
        book.order_index.remove(&id);
        book.orders.remove(key);
    }
}

/// Cancel a fill-and-kill order left at the head of either ladder.
///
/// Only the order inserted by the current submit call can be a
/// fill-and-kill here: such orders never survive their own submit, and
/// an unfilled remainder always sits at the top of its side (its price
/// crossed the opposite best, so it is strictly better than every
/// other resting price on its side).
fn cancel_unmatched_fill_and_kill(book: &mut OrderBook) {
    let fak_bid = book
        .bids
        .values()
        .next()
        .and_then(|level| level.peek_head())
        .and_then(|key| book.orders.get(key))
        .filter(|node| node.order.order_type == OrderType::FillAndKill)
        .map(|node| node.order_id());
    if let Some(id) = fak_bid {
        debug!(id, "canceling unmatched fill-and-kill remainder");
        book.cancel(id);
    }

    let fak_ask = book
        .asks
        .values()
        .next()
        .and_then(|level| level.peek_head())
        .and_then(|key| book.orders.get(key))
        .filter(|node| node.order.order_type == OrderType::FillAndKill)
        .map(|node| node.order_id());
    if let Some(id) = fak_ask {
        debug!(id, "canceling unmatched fill-and-kill remainder");
        book.cancel(id);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
