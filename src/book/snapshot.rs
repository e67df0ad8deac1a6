//! Book snapshot for market data (spec.md §4.3 `in_order_traversal`, §6
//! `LOBSnapshot`).

use serde::Serialize;

use super::price_level::LevelSnapshot;

/// Point-in-time view of both sides of a book: bids and asks, each in
/// ascending price order (spec.md §4.3 is explicit that *both* sides are
/// ascending, even though the best bid is the maximum).
#[derive(Debug, Clone, Serialize)]
pub struct BookSnapshot {
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}
