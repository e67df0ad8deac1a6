//! Request/response shapes for the HTTP surface (spec.md §6), matching
//! `original_source/assets/book/order.go`'s `OrderSchema` JSON tags.

use serde::{Deserialize, Serialize};

use crate::book::LevelSnapshot;
use crate::ids::{Price, UserId};
use crate::ledger::LedgerEntry;

/// `POST /api/order` request body.
///
/// The Go original's schema carries no submitter identity — every order
/// was attributed to hardcoded user ids (SPEC_FULL.md §10's fixed bug).
/// Since the fix requires the real buyer/seller id on every fill, and
/// the spec's external-interface table is silent on how a caller
/// identifies itself (not one of spec.md §1's Non-goals), `user_id` is
/// added here as the natural extension of the original schema rather
/// than reintroducing the hardcoded-id bug.
#[derive(Debug, Deserialize)]
pub struct OrderSubmission {
    pub symbol: String,
    pub qty: i64,
    #[serde(rename = "type")]
    pub order_type: String,
    pub side: String,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub time_in_force: String,
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct OrderAccepted {
    pub message: &'static str,
}

/// `GET /api/{assetID}/data/LOBSnapshot` response: `[bids, asks]`.
#[derive(Debug, Serialize)]
pub struct BookSnapshotResponse(pub [Vec<LevelSnapshot>; 2]);

pub type MarketPriceResponse = Price;

pub type LedgerSnapshotResponse = Vec<LedgerEntry>;
