//! Side-Tree: a price-ordered collection of `PriceLevel`s for one side of
//! one book, with an O(1) cached best price (spec.md §3, §4.2).

use std::sync::Arc;

use crossbeam::atomic::AtomicCell;
use crossbeam_skiplist::SkipMap;

use crate::ids::Price;

use super::price_level::{LevelSnapshot, PriceLevel};

/// Which extreme of the tree counts as "best" for this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// Bids: best = highest price.
    Max,
    /// Asks: best = lowest price.
    Min,
}

/// Ordered map from price to `PriceLevel`, backed by a lock-free skip
/// list so reader tasks (HTTP snapshot handlers) never block behind the
/// book's single matcher. `best` is a cached pointer refreshed on every
/// insert/delete rather than recomputed on every read (spec.md §4.2).
pub struct SideTree {
    extreme: Extreme,
    levels: SkipMap<Price, Arc<PriceLevel>>,
    best: AtomicCell<Option<Price>>,
}

impl SideTree {
    pub fn new(extreme: Extreme) -> Self {
        Self {
            extreme,
            levels: SkipMap::new(),
            best: AtomicCell::new(None),
        }
    }

    /// Cached best price for this side (max for bids, min for asks).
    pub fn best(&self) -> Option<Price> {
        self.best.load()
    }

    fn is_better(&self, candidate: Price, than: Price) -> bool {
        match self.extreme {
            Extreme::Max => candidate > than,
            Extreme::Min => candidate < than,
        }
    }

    /// Fetch the level at `price`, if one is resting.
    pub fn get(&self, price: Price) -> Option<Arc<PriceLevel>> {
        self.levels.get(&price).map(|e| Arc::clone(e.value()))
    }

    /// Get the level at `price`, creating an empty one and inserting it
    /// (updating the best-price cache) if it doesn't exist yet.
    pub fn get_or_create(&self, price: Price) -> Arc<PriceLevel> {
        if let Some(entry) = self.levels.get(&price) {
            return Arc::clone(entry.value());
        }
        let level = Arc::new(PriceLevel::new(price));
        self.levels.insert(price, Arc::clone(&level));
        match self.best.load() {
            Some(current) if !self.is_better(price, current) => {}
            _ => self.best.store(Some(price)),
        }
        level
    }

    /// Remove an empty level and refresh the best-price cache. No-op if
    /// the level still has resting orders or doesn't exist — callers
    /// must check `PriceLevel::is_empty()` first (L3).
    pub fn remove_if_empty(&self, price: Price) {
        if let Some(entry) = self.levels.get(&price) {
            if !entry.value().is_empty() {
                return;
            }
            entry.remove();
        } else {
            return;
        }
        self.refresh_best();
    }

    fn refresh_best(&self) {
        let new_best = match self.extreme {
            Extreme::Max => self.levels.back().map(|e| *e.key()),
            Extreme::Min => self.levels.front().map(|e| *e.key()),
        };
        self.best.store(new_best);
    }

    /// Levels in priority order: best first. Used by the matching sweep.
    pub fn levels_best_first(&self) -> Vec<(Price, Arc<PriceLevel>)> {
        let mut out: Vec<(Price, Arc<PriceLevel>)> = self
            .levels
            .iter()
            .map(|e| (*e.key(), Arc::clone(e.value())))
            .collect();
        if self.extreme == Extreme::Max {
            out.reverse();
        }
        out
    }

    /// Levels in ascending price order, for the book snapshot (spec.md
    /// §4.3 — both bids and asks are reported ascending).
    pub fn ascending_snapshot(&self) -> Vec<LevelSnapshot> {
        self.levels.iter().map(|e| e.value().snapshot()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_tracks_max_for_bids() {
        let tree = SideTree::new(Extreme::Max);
        tree.get_or_create(10);
        assert_eq!(tree.best(), Some(10));
        tree.get_or_create(20);
        assert_eq!(tree.best(), Some(20));
        tree.get_or_create(5);
        assert_eq!(tree.best(), Some(20));
    }

    #[test]
    fn best_tracks_min_for_asks() {
        let tree = SideTree::new(Extreme::Min);
        tree.get_or_create(10);
        assert_eq!(tree.best(), Some(10));
        tree.get_or_create(5);
        assert_eq!(tree.best(), Some(5));
        tree.get_or_create(20);
        assert_eq!(tree.best(), Some(5));
    }

    #[test]
    fn removing_best_refreshes_cache() {
        let tree = SideTree::new(Extreme::Min);
        let a = tree.get_or_create(5);
        tree.get_or_create(10);
        a.remove(1); // no-op, empty level check below is what matters
        assert!(a.is_empty());
        tree.remove_if_empty(5);
        assert_eq!(tree.best(), Some(10));
    }

    #[test]
    fn remove_if_empty_is_noop_when_not_empty() {
        let tree = SideTree::new(Extreme::Min);
        let level = tree.get_or_create(5);
        level.append(crate::book::order::RestingOrder {
            order_id: 1,
            side: crate::book::order::Side::Sell,
            price: 5,
            shares_remaining: 10,
            entry_time: 0,
            user_id: 1,
        });
        tree.remove_if_empty(5);
        assert_eq!(tree.best(), Some(5));
    }

    #[test]
    fn levels_best_first_orders_correctly() {
        let tree = SideTree::new(Extreme::Max);
        tree.get_or_create(10);
        tree.get_or_create(30);
        tree.get_or_create(20);
        let prices: Vec<Price> = tree.levels_best_first().into_iter().map(|(p, _)| p).collect();
        assert_eq!(prices, vec![30, 20, 10]);
    }
}
