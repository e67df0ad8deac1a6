//! The validated submission handed to a book's intake queue.

use serde::Deserialize;

use crate::book::{OrderType, Side, TimeInForce};
use crate::ids::{Price, Shares, UserId};

/// A fully-validated order, ready for the matcher (spec.md §4.3, §4.4).
/// Constructed only by the HTTP layer after symbol/side/type/qty
/// validation — nothing reaches intake unvalidated.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub order_type: OrderType,
    pub shares: Shares,
    /// Required for `OrderType::Limit`, ignored for `OrderType::Market`.
    pub limit_price: Option<Price>,
    pub user_id: UserId,
    /// Accepted but unused by matching (spec.md §9 open question).
    #[serde(default)]
    pub time_in_force: TimeInForce,
}
