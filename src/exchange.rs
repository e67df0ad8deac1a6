//! Exchange context (SPEC_FULL.md §9 "Global state" design note): one
//! explicit value owning the asset registry, user registry, ledger, and
//! per-asset matcher handles — replacing the Go original's process-wide
//! `Ledger`/`UserRegistry` singletons.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::assets::{seed_book, seed_users, AssetRegistry};
use crate::book::Book;
use crate::config::ExchangeConfig;
use crate::ids::AssetId;
use crate::ledger::Ledger;
use crate::matcher::MatcherHandle;
use crate::users::UserRegistry;

/// Everything a request handler or matcher task needs, wired up once at
/// startup and shared behind an `Arc` thereafter.
pub struct ExchangeContext {
    pub assets: AssetRegistry,
    pub users: Arc<UserRegistry>,
    pub ledger: Arc<Ledger>,
    books: DashMap<AssetId, Arc<MatcherHandle>>,
}

impl ExchangeContext {
    /// Bootstrap the exchange (spec.md §6 Bootstrap): create the
    /// configured asset set, start one matcher per book, seed users and
    /// initial book depth.
    pub fn bootstrap(config: &ExchangeConfig) -> Self {
        let assets = AssetRegistry::new();
        let users = Arc::new(UserRegistry::new());
        let ledger = Arc::new(Ledger::new(Arc::clone(&users)));
        let books = DashMap::new();

        let seed_user_ids = seed_users(&users);

        for seed in &config.seed_assets {
            let asset_id = assets.register(seed.symbol.clone(), seed.name.clone());
            let book = Arc::new(Book::new(asset_id));
            seed_book(
                &book,
                &users,
                &ledger,
                asset_id,
                &seed_user_ids,
                config.seed_mid_price,
            );
            let handle = MatcherHandle::spawn(book, Arc::clone(&ledger), config.intake_capacity);
            info!(symbol = %seed.symbol, asset_id, "book online");
            books.insert(asset_id, Arc::new(handle));
        }

        Self {
            assets,
            users,
            ledger,
            books,
        }
    }

    pub fn matcher(&self, asset_id: AssetId) -> Option<Arc<MatcherHandle>> {
        self.books.get(&asset_id).map(|e| Arc::clone(e.value()))
    }

    pub fn matcher_for_symbol(&self, symbol: &str) -> Option<Arc<MatcherHandle>> {
        let asset_id = self.assets.lookup(symbol)?;
        self.matcher(asset_id)
    }

    pub fn shutdown(&self) {
        for entry in self.books.iter() {
            entry.value().shutdown();
        }
    }
}
