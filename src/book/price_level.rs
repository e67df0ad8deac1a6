//! Price-Level: a FIFO queue of resting orders at one price, with cached
//! size and volume (spec.md §3 C1, §4.1).

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ids::{OrderId, Price, Shares, UserId};

use super::order::RestingOrder;

/// One fill produced while scanning a level, plus what happened to the
/// resting order it matched against.
#[derive(Debug, Clone)]
pub struct LevelFill {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub shares: Shares,
    pub order_fully_consumed: bool,
}

/// Outcome of a single `fill` pass over a level.
#[derive(Debug, Default)]
pub struct LevelFillOutcome {
    pub fills: Vec<LevelFill>,
    pub shares_filled: Shares,
    pub level_empty: bool,
}

struct PriceLevelInner {
    orders: VecDeque<RestingOrder>,
    size: usize,
    total_volume: Shares,
}

impl PriceLevelInner {
    fn assert_invariants(&self) {
        debug_assert_eq!(self.size, self.orders.len(), "L1: size == len(orders)");
        debug_assert_eq!(
            self.total_volume,
            self.orders.iter().map(|o| o.shares_remaining).sum::<Shares>(),
            "L2: total_volume == sum(shares_remaining)"
        );
    }
}

/// A FIFO queue of resting orders at a single price, on one side of one book.
///
/// Interior-mutable: the book holds `Arc<PriceLevel>` in its `SideTree` so
/// that concurrent snapshot readers can see a level while the matcher
/// mutates it. All mutation (`append`, `fill`, `remove`) takes the same
/// internal lock, so every observer sees size/volume/orders agree (L1, L2).
pub struct PriceLevel {
    pub price: Price,
    inner: Mutex<PriceLevelInner>,
}

impl PriceLevel {
    pub fn new(price: Price) -> Self {
        Self {
            price,
            inner: Mutex::new(PriceLevelInner {
                orders: VecDeque::new(),
                size: 0,
                total_volume: 0,
            }),
        }
    }

    /// Push a new resting order to the tail of the queue.
    pub fn append(&self, order: RestingOrder) {
        let mut inner = self.inner.lock().unwrap();
        inner.total_volume += order.shares_remaining;
        inner.orders.push_back(order);
        inner.size += 1;
        inner.assert_invariants();
    }

    /// Scan the level from the head, attempting to fill up to
    /// `shares_needed` against each resting order in FIFO order via
    /// `try_trade`. `try_trade(order_id, user_id, shares, price) -> bool`
    /// should perform the ledger side-effect and report whether it
    /// committed.
    ///
    /// An order whose trade is refused (ledger precondition failed) is
    /// left completely untouched and the scan moves to the next order in
    /// the level, per spec.md §4.6/§7 — a refusal is "as if the
    /// counterparty order did not exist", not a cancellation.
    pub fn fill<F>(&self, shares_needed: Shares, mut try_trade: F) -> LevelFillOutcome
    where
        F: FnMut(OrderId, UserId, Shares) -> bool,
    {
        let mut inner = self.inner.lock().unwrap();
        let mut remaining = shares_needed;
        let mut outcome = LevelFillOutcome::default();
        let mut i = 0;
        while remaining > 0 && i < inner.orders.len() {
            let (order_id, user_id, available) = {
                let o = &inner.orders[i];
                (o.order_id, o.user_id, o.shares_remaining)
            };
            let f = available.min(remaining);
            if try_trade(order_id, user_id, f) {
                let fully_consumed = {
                    let o = &mut inner.orders[i];
                    o.shares_remaining -= f;
                    o.shares_remaining == 0
                };
                inner.total_volume -= f;
                remaining -= f;
                outcome.fills.push(LevelFill {
                    order_id,
                    user_id,
                    shares: f,
                    order_fully_consumed: fully_consumed,
                });
                if fully_consumed {
                    inner.orders.remove(i);
                    inner.size -= 1;
                    // next order slides into position i
                } else {
                    i += 1;
                }
            } else {
                // refused: leave this order resting untouched, try the next one
                i += 1;
            }
        }
        outcome.shares_filled = shares_needed - remaining;
        outcome.level_empty = inner.orders.is_empty();
        inner.assert_invariants();
        outcome
    }

    /// Remove a resting order by id, wherever it sits in the queue
    /// (used by cancel). Linear scan — acceptable per spec.md §4.1,
    /// cancel is rare relative to matching.
    pub fn remove(&self, order_id: OrderId) -> Option<RestingOrder> {
        let mut inner = self.inner.lock().unwrap();
        let pos = inner.orders.iter().position(|o| o.order_id == order_id)?;
        let removed = inner.orders.remove(pos).unwrap();
        inner.size -= 1;
        inner.total_volume -= removed.shares_remaining;
        inner.assert_invariants();
        Some(removed)
    }

    pub fn size(&self) -> usize {
        self.inner.lock().unwrap().size
    }

    pub fn total_volume(&self) -> Shares {
        self.inner.lock().unwrap().total_volume
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().orders.is_empty()
    }

    /// Point-in-time `{price, size, total_volume}` view for snapshots.
    pub fn snapshot(&self) -> LevelSnapshot {
        let inner = self.inner.lock().unwrap();
        LevelSnapshot {
            price: self.price,
            size: inner.size,
            total_volume: inner.total_volume,
        }
    }
}

/// `{price, size, volume}` — one row of a book snapshot (spec.md §4.3, §6).
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct LevelSnapshot {
    pub price: Price,
    pub size: usize,
    pub volume: Shares,
}
