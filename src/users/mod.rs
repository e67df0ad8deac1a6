//! User Registry (C7, spec.md §3 User, §4.7): id-indexed user table with
//! a secondary name index, cash balance, and per-asset share counts.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use dashmap::DashMap;
use serde::Serialize;

use crate::ids::{AssetId, Price, Shares, UserId};

/// `{user_id, name, cash, shares_owned, assets}` (spec.md §3 User).
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub user_id: UserId,
    pub name: String,
    pub cash: u64,
    pub shares_owned: HashMap<AssetId, Shares>,
    pub assets: HashSet<AssetId>,
}

struct UserRecord {
    user_id: UserId,
    name: String,
    cash: u64,
    shares_owned: HashMap<AssetId, Shares>,
    assets: HashSet<AssetId>,
}

impl UserRecord {
    fn assert_invariants(&self) {
        for (&asset, &qty) in &self.shares_owned {
            debug_assert!(
                (qty > 0) == self.assets.contains(&asset),
                "U1: shares_owned[a] > 0 iff a in assets"
            );
        }
    }

    fn view(&self) -> UserView {
        UserView {
            user_id: self.user_id,
            name: self.name.clone(),
            cash: self.cash,
            shares_owned: self.shares_owned.clone(),
            assets: self.assets.clone(),
        }
    }
}

/// Errors from direct cash adjustments (spec.md §4.7).
#[derive(Debug, thiserror::Error)]
pub enum UsersError {
    #[error("user {0} not found")]
    NotFound(UserId),
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("withdrawal of {amount} exceeds balance {balance}")]
    InsufficientFunds { amount: u64, balance: u64 },
}

/// Users keyed by id, plus a name→id secondary index (mirrors the
/// original's `Users.IDs` map, spec.md §9 SPEC_FULL supplement).
pub struct UserRegistry {
    users: DashMap<UserId, RwLock<UserRecord>>,
    name_index: DashMap<String, UserId>,
    next_id: AtomicU64,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            name_index: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new user with zero cash and no positions.
    pub fn create(&self, name: impl Into<String>) -> UserId {
        let user_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let name = name.into();
        self.users.insert(
            user_id,
            RwLock::new(UserRecord {
                user_id,
                name: name.clone(),
                cash: 0,
                shares_owned: HashMap::new(),
                assets: HashSet::new(),
            }),
        );
        self.name_index.insert(name, user_id);
        user_id
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<UserId> {
        self.name_index.get(name).map(|e| *e.value())
    }

    pub fn view(&self, user_id: UserId) -> Option<UserView> {
        let entry = self.users.get(&user_id)?;
        Some(entry.value().read().unwrap().view())
    }

    /// Add `amount` to a user's cash. A non-positive amount is a silent
    /// no-op that returns the balance unchanged (spec.md §4.7; mirrors
    /// the source's `DepositCash`, which never errors on bad input).
    pub fn deposit(&self, user_id: UserId, amount: u64) -> Result<u64, UsersError> {
        let entry = self.users.get(&user_id).ok_or(UsersError::NotFound(user_id))?;
        let mut record = entry.value().write().unwrap();
        if amount == 0 {
            return Ok(record.cash);
        }
        record.cash += amount;
        Ok(record.cash)
    }

    /// Remove `amount` from a user's cash. Rejects non-positive amounts
    /// or amounts exceeding the balance, with no change (spec.md §4.7,
    /// U2: `cash >= 0`).
    pub fn withdraw(&self, user_id: UserId, amount: u64) -> Result<u64, UsersError> {
        if amount == 0 {
            return Err(UsersError::NonPositiveAmount);
        }
        let entry = self.users.get(&user_id).ok_or(UsersError::NotFound(user_id))?;
        let mut record = entry.value().write().unwrap();
        if amount > record.cash {
            return Err(UsersError::InsufficientFunds {
                amount,
                balance: record.cash,
            });
        }
        record.cash -= amount;
        Ok(record.cash)
    }

    /// Credit `asset_id` shares directly (used by seed bootstrap to hand
    /// sellers inventory before the book opens; never called mid-trade —
    /// trade settlement goes through `try_settle_trade`).
    pub fn grant_shares(&self, user_id: UserId, asset_id: AssetId, shares: Shares) {
        if let Some(entry) = self.users.get(&user_id) {
            let mut record = entry.value().write().unwrap();
            *record.shares_owned.entry(asset_id).or_insert(0) += shares;
            if record.shares_owned[&asset_id] > 0 {
                record.assets.insert(asset_id);
            }
            record.assert_invariants();
        }
    }

    /// Atomically check and apply one trade's cash/share transfer
    /// (spec.md §4.6 steps 1–2 and 4). Locks the two users in a fixed
    /// order (by id) so concurrent calls can never deadlock — though in
    /// practice `Ledger::record_trade` already serializes all callers.
    ///
    /// Returns `false` (no mutation) if either precondition fails:
    /// buyer's cash is insufficient, or seller doesn't hold enough
    /// shares of `asset_id`.
    pub fn try_settle_trade(
        &self,
        asset_id: AssetId,
        shares: Shares,
        price: Price,
        buyer_id: UserId,
        seller_id: UserId,
    ) -> bool {
        let notional = shares * price;
        let (Some(buyer_entry), Some(seller_entry)) =
            (self.users.get(&buyer_id), self.users.get(&seller_id))
        else {
            return false;
        };

        if buyer_id == seller_id {
            // A user trading with themselves still needs both
            // preconditions to hold; cash and shares net to zero so
            // nothing is actually mutated.
            let record = buyer_entry.value().read().unwrap();
            let owned = *record.shares_owned.get(&asset_id).unwrap_or(&0);
            return record.cash >= notional && owned >= shares;
        }

        // Consistent lock order avoids A-locks-B/B-locks-A deadlocks.
        let (first_id, second_id) = if buyer_id < seller_id {
            (buyer_id, seller_id)
        } else {
            (seller_id, buyer_id)
        };
        let first_entry = if first_id == buyer_id { &buyer_entry } else { &seller_entry };
        let second_entry = if second_id == buyer_id { &buyer_entry } else { &seller_entry };

        let mut first = first_entry.value().write().unwrap();
        let mut second = second_entry.value().write().unwrap();
        let (buyer, seller) = if first.user_id == buyer_id {
            (&mut *first, &mut *second)
        } else {
            (&mut *second, &mut *first)
        };

        if buyer.cash < notional {
            return false;
        }
        let seller_owned = *seller.shares_owned.get(&asset_id).unwrap_or(&0);
        if seller_owned < shares {
            return false;
        }

        buyer.cash -= notional;
        seller.cash += notional;
        *buyer.shares_owned.entry(asset_id).or_insert(0) += shares;
        buyer.assets.insert(asset_id);

        let remaining = seller_owned - shares;
        if remaining == 0 {
            seller.shares_owned.remove(&asset_id);
            seller.assets.remove(&asset_id);
        } else {
            seller.shares_owned.insert(asset_id, remaining);
        }

        buyer.assert_invariants();
        seller.assert_invariants();
        true
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
