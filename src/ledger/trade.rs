//! Trade: an immutable record of one executed fill (spec.md §3).

use serde::Serialize;

use crate::ids::{AssetId, Price, Shares, TradeId, UserId};

/// `{trade_id, asset_id, buyer_id, seller_id, shares, price, timestamp}`,
/// immutable once appended to the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub asset_id: AssetId,
    pub buyer_id: UserId,
    pub seller_id: UserId,
    pub shares: Shares,
    pub price: Price,
    pub timestamp: u64,
}

/// Ledger-history row shape for `GET .../LedgerSnapshot` (spec.md §6),
/// matching the original's `Transaction` JSON tags (`numShares`, `price`,
/// `time`) bit-for-bit.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    #[serde(rename = "numShares")]
    pub num_shares: Shares,
    pub price: Price,
    #[serde(rename = "time")]
    pub time: u64,
}

impl From<&Trade> for LedgerEntry {
    fn from(trade: &Trade) -> Self {
        LedgerEntry {
            num_shares: trade.shares,
            price: trade.price,
            time: trade.timestamp,
        }
    }
}
