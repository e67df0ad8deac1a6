//! Asset registry: symbol↔id↔metadata bootstrap (spec.md §1 "asset
//! registry bootstrap" — named as an external collaborator there, owned
//! here by the exchange context per SPEC_FULL.md §9).

mod seed;

pub use seed::{seed_book, seed_users};

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::ids::AssetId;

/// `{asset_id, symbol, name}` — the configured identity of one tradeable
/// asset, created once at startup and immutable thereafter.
#[derive(Debug, Clone)]
pub struct AssetMeta {
    pub asset_id: AssetId,
    pub symbol: String,
    pub name: String,
}

/// Symbol→id lookup plus id→metadata, backing the HTTP layer's
/// `{assetID}` path segment (spec.md §6 treats `assetID` as already
/// resolved; this is what resolves it).
pub struct AssetRegistry {
    by_symbol: DashMap<String, AssetId>,
    by_id: DashMap<AssetId, AssetMeta>,
    next_id: AtomicU64,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self {
            by_symbol: DashMap::new(),
            by_id: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new asset, returning its assigned id. Symbols are
    /// expected to be unique; registering a duplicate symbol returns a
    /// fresh id for a second metadata entry (bootstrap-only code path,
    /// no production caller does this after startup).
    pub fn register(&self, symbol: impl Into<String>, name: impl Into<String>) -> AssetId {
        let asset_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let symbol = symbol.into();
        self.by_symbol.insert(symbol.clone(), asset_id);
        self.by_id.insert(
            asset_id,
            AssetMeta {
                asset_id,
                symbol,
                name: name.into(),
            },
        );
        asset_id
    }

    pub fn lookup(&self, symbol: &str) -> Option<AssetId> {
        self.by_symbol.get(symbol).map(|e| *e.value())
    }

    pub fn metadata(&self, asset_id: AssetId) -> Option<AssetMeta> {
        self.by_id.get(&asset_id).map(|e| e.value().clone())
    }

    pub fn list(&self) -> Vec<AssetMeta> {
        self.by_id.iter().map(|e| e.value().clone()).collect()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
