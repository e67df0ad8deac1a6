//! Book: two Side-Trees (bid, ask), order index, last-trade price
//! (spec.md §3 C3, §4.3).

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::ids::{AssetId, OrderId, Price};

use super::error::BookError;
use super::order::Side;
use super::registry::OrderIdGenerator;
use super::side_tree::{Extreme, SideTree};
use super::snapshot::BookSnapshot;

/// Where a resting order lives, for O(1) cancel (spec.md §3 `order_index`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderLocation {
    pub price: Price,
    pub side: Side,
}

/// Two price-ordered Side-Trees plus the order index and last-trade
/// price for a single asset. Mutated by exactly one matcher task
/// (spec.md §5); reads (snapshot, best price, last price) may run
/// concurrently with that task because `SideTree`/`PriceLevel` are
/// internally safe for single-writer/many-reader access.
pub struct Book {
    pub asset_id: AssetId,
    pub(crate) bids: SideTree,
    pub(crate) asks: SideTree,
    pub(crate) order_index: DashMap<OrderId, OrderLocation>,
    last_price: AtomicU64,
    pub(crate) ids: OrderIdGenerator,
}

impl Book {
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            bids: SideTree::new(Extreme::Max),
            asks: SideTree::new(Extreme::Min),
            order_index: DashMap::new(),
            last_price: AtomicU64::new(0),
            ids: OrderIdGenerator::new(),
        }
    }

    pub(crate) fn tree_for(&self, side: Side) -> &SideTree {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// Initially 0, set to the price of the most recently executed fill.
    pub fn last_price(&self) -> Price {
        self.last_price.load(Ordering::Acquire)
    }

    pub(crate) fn set_last_price(&self, price: Price) {
        self.last_price.store(price, Ordering::Release);
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best()
    }

    /// A marketable limit order is one whose price already crosses the
    /// opposite side's best quote at submission time (spec.md §4.3,
    /// GLOSSARY).
    pub fn is_marketable(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.asks.best().is_some_and(|ask| price >= ask),
            Side::Sell => self.bids.best().is_some_and(|bid| price <= bid),
        }
    }

    /// Cancel a resting order. No-op (logged by the caller) if the id is
    /// unknown (spec.md §4.3, §7).
    ///
    /// Once `order_index` names a location for `order_id`, that location
    /// must actually hold the order (invariant B2). Either half of that
    /// failing — the level is gone, or the level doesn't have the order
    /// — means `order_index` and the side trees have already diverged,
    /// which spec.md §7 calls a fatal internal consistency violation, not
    /// a recoverable no-op.
    pub fn cancel(&self, order_id: OrderId) -> bool {
        let Some((_, location)) = self.order_index.remove(&order_id) else {
            return false;
        };
        let tree = self.tree_for(location.side);
        let Some(level) = tree.get(location.price) else {
            panic!(
                "{}",
                BookError::OrderIndexInconsistent {
                    order_id,
                    price: location.price,
                }
            );
        };
        if level.remove(order_id).is_none() {
            panic!(
                "{}",
                BookError::OrderIndexInconsistent {
                    order_id,
                    price: location.price,
                }
            );
        }
        tree.remove_if_empty(location.price);
        true
    }

    /// All currently resting order ids, in no particular order. Mainly
    /// useful for tests and maintenance tooling that need to target a
    /// specific resting order without a network-facing lookup (spec.md
    /// §1 excludes cancel from the external surface entirely).
    pub fn resting_order_ids(&self) -> Vec<OrderId> {
        self.order_index.iter().map(|e| *e.key()).collect()
    }

    /// Point-in-time `{bids, asks}` view, both ascending by price.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.bids.ascending_snapshot(),
            asks: self.asks.ascending_snapshot(),
        }
    }
}
