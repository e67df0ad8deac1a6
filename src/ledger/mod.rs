//! Ledger (C6, spec.md §3 Ledger, §4.6): append-only trade log with
//! per-asset and per-user indices, and the atomic cash/position transfer
//! that backs every fill.

mod trade;

pub use trade::{LedgerEntry, Trade};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::ids::{AssetId, Price, Shares, UserId};
use crate::users::UserRegistry;

struct LedgerInner {
    trades_all: Vec<Arc<Trade>>,
    by_asset: std::collections::HashMap<AssetId, Vec<Arc<Trade>>>,
    by_user: std::collections::HashMap<UserId, Vec<Arc<Trade>>>,
}

/// Shared across every book's matcher task (spec.md §5); `record_trade`
/// serializes all mutation behind a single mutex, exactly as spec.md §5
/// prescribes ("a single mutex around `record_trade` is sufficient").
pub struct Ledger {
    next_trade_id: AtomicU64,
    inner: Mutex<LedgerInner>,
    users: Arc<UserRegistry>,
}

impl Ledger {
    pub fn new(users: Arc<UserRegistry>) -> Self {
        Self {
            next_trade_id: AtomicU64::new(1),
            inner: Mutex::new(LedgerInner {
                trades_all: Vec::new(),
                by_asset: std::collections::HashMap::new(),
                by_user: std::collections::HashMap::new(),
            }),
            users,
        }
    }

    /// Attempt to record one trade. Checks buyer cash and seller shares,
    /// mutates both users' balances and this ledger's indices atomically
    /// on success, and returns whether it committed (spec.md §4.6).
    ///
    /// A `false` return means no state changed anywhere — the caller
    /// (the matcher) must treat the fill as if it never happened.
    pub fn record_trade(
        &self,
        asset_id: AssetId,
        shares: Shares,
        price: Price,
        buyer_id: UserId,
        seller_id: UserId,
    ) -> Option<Trade> {
        let mut inner = self.inner.lock().unwrap();

        if !self
            .users
            .try_settle_trade(asset_id, shares, price, buyer_id, seller_id)
        {
            return None;
        }

        let trade = Arc::new(Trade {
            trade_id: self.next_trade_id.fetch_add(1, Ordering::Relaxed),
            asset_id,
            buyer_id,
            seller_id,
            shares,
            price,
            timestamp: crate::utils::current_time_millis(),
        });

        inner.trades_all.push(Arc::clone(&trade));
        inner
            .by_asset
            .entry(asset_id)
            .or_default()
            .push(Arc::clone(&trade));
        inner
            .by_user
            .entry(buyer_id)
            .or_default()
            .push(Arc::clone(&trade));
        inner.by_user.entry(seller_id).or_default().push(Arc::clone(&trade));

        Some((*trade).clone())
    }

    /// All trades for one asset, oldest first.
    pub fn asset_history(&self, asset_id: AssetId) -> Vec<Trade> {
        let inner = self.inner.lock().unwrap();
        inner
            .by_asset
            .get(&asset_id)
            .map(|trades| trades.iter().map(|t| (**t).clone()).collect())
            .unwrap_or_default()
    }

    /// All trades a user participated in as buyer or seller, oldest first.
    pub fn user_history(&self, user_id: UserId) -> Vec<Trade> {
        let inner = self.inner.lock().unwrap();
        inner
            .by_user
            .get(&user_id)
            .map(|trades| trades.iter().map(|t| (**t).clone()).collect())
            .unwrap_or_default()
    }

    pub fn trade_count(&self) -> usize {
        self.inner.lock().unwrap().trades_all.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Ledger, UserId, UserId) {
        let users = Arc::new(UserRegistry::new());
        let buyer = users.create("buyer");
        let seller = users.create("seller");
        users.deposit(buyer, 10_000).unwrap();
        users.grant_shares(seller, 1, 100);
        (Ledger::new(users), buyer, seller)
    }

    #[test]
    fn record_trade_commits_and_indexes() {
        let (ledger, buyer, seller) = setup();
        let trade = ledger.record_trade(1, 10, 50, buyer, seller).unwrap();
        assert_eq!(trade.shares, 10);
        assert_eq!(trade.price, 50);
        assert_eq!(ledger.trade_count(), 1);
        assert_eq!(ledger.asset_history(1).len(), 1);
        assert_eq!(ledger.user_history(buyer).len(), 1);
        assert_eq!(ledger.user_history(seller).len(), 1);
    }

    #[test]
    fn record_trade_refuses_and_mutates_nothing() {
        let (ledger, buyer, seller) = setup();
        // seller only has 100 shares
        assert!(ledger.record_trade(1, 1_000, 50, buyer, seller).is_none());
        assert_eq!(ledger.trade_count(), 0);
        assert!(ledger.asset_history(1).is_empty());
    }

    #[test]
    fn trade_ids_are_monotonic() {
        let (ledger, buyer, seller) = setup();
        let t1 = ledger.record_trade(1, 5, 10, buyer, seller).unwrap();
        let t2 = ledger.record_trade(1, 5, 10, buyer, seller).unwrap();
        assert!(t2.trade_id > t1.trade_id);
    }
}
