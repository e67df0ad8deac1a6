//! Identifier type aliases shared across the book, ledger and user registry.
//!
//! Kept as plain integer aliases (not newtypes) to match the source
//! system's untyped `int` ids one-for-one; price and share counts are
//! likewise raw non-negative integers per the data model.

/// Identifies an asset (and therefore its `Book`) for the lifetime of the process.
pub type AssetId = u64;

/// Identifies a resting order, unique within its book. Assigned by the
/// book's own `OrderIdGenerator`, never process-global.
pub type OrderId = u64;

/// Identifies a user in the `UserRegistry`.
pub type UserId = u64;

/// Identifies a single `Trade` in the ledger.
pub type TradeId = u64;

/// Raw integer price. No implicit decimal point; ticks are whole units.
pub type Price = u64;

/// Raw integer share count.
pub type Shares = u64;
