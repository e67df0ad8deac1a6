//! Order-side domain types: `Side`, `OrderType`, `TimeInForce`, and the
//! resting `Order` record that lives inside a `PriceLevel`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{OrderId, Price, Shares, UserId};

/// Which side of the book an order sits on, or which side a submission requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Resting buyer / incoming buy order.
    Buy,
    /// Resting seller / incoming sell order.
    Sell,
}

impl Side {
    /// The side that a matching order must come from to cross this one.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// The two order types this engine understands. Anything else (stop,
/// iceberg, pegged, ...) is out of scope — see spec.md §1 Non-goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Sweeps resting liquidity at whatever price is available; never rests.
    Market,
    /// Rests at `limit_price` unless marketable at submission time.
    Limit,
}

/// Accepted but unused by matching — see spec.md §9's open question.
/// Every order behaves as DAY/IOC based on `OrderType` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    #[default]
    Day,
    Ioc,
    Gtc,
}

/// A resting order living inside exactly one `PriceLevel`.
///
/// Immutable except for `shares_remaining`, which the matcher decrements
/// (or the level removes entirely) as fills land. `entry_time` is the tick
/// assigned at intake; the FIFO position in the level's queue is the
/// authoritative tiebreaker (spec.md §3), `entry_time` is carried for
/// display/debugging only.
#[derive(Debug, Clone)]
pub struct RestingOrder {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub shares_remaining: Shares,
    pub entry_time: u64,
    pub user_id: UserId,
}
