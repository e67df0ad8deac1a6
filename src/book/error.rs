//! Book-level error type, mirroring the teacher's `OrderBookError` shape
//! (non-exhaustive enum, manual `Display`, blanket `std::error::Error`).

use std::fmt;

use crate::ids::{OrderId, Price};

/// Errors surfaced by `Book` operations that are not silent no-ops.
///
/// Cancel-of-unknown-id is deliberately *not* a variant here — spec.md
/// §4.3/§7 treats it as a logged no-op, not an error.
#[derive(Debug)]
#[non_exhaustive]
pub enum BookError {
    /// A resting order referenced by `order_id` in `order_index` has no
    /// matching entry in its `PriceLevel`. Indicates a broken B2
    /// invariant; callers should treat this as fatal per spec.md §7.
    OrderIndexInconsistent { order_id: OrderId, price: Price },
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::OrderIndexInconsistent { order_id, price } => write!(
                f,
                "order {order_id} indexed at price {price} but absent from its price level"
            ),
        }
    }
}

impl std::error::Error for BookError {}
