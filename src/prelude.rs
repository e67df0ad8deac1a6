//! Commonly used types re-exported for `use exchange_engine::prelude::*;`.

pub use crate::book::{Book, BookSnapshot, Fill, OrderType, Side, TimeInForce};
pub use crate::exchange::ExchangeContext;
pub use crate::ids::{AssetId, OrderId, Price, Shares, TradeId, UserId};
pub use crate::ledger::{Ledger, LedgerEntry, Trade};
pub use crate::matcher::{MatcherHandle, OrderRequest};
pub use crate::users::{UserRegistry, UserView, UsersError};
