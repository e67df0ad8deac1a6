//! The book subsystem: Price-Level (C1), Side-Tree (C2), Book (C3), and
//! the order-id registry (C5) that backs it, per spec.md §3-4.

mod book;
mod error;
mod matching;
mod order;
mod price_level;
mod registry;
mod side_tree;
mod snapshot;

pub use book::Book;
pub use error::BookError;
pub use matching::Fill;
pub use order::{OrderType, RestingOrder, Side, TimeInForce};
pub use price_level::{LevelFill, LevelFillOutcome, LevelSnapshot, PriceLevel};
pub use registry::OrderIdGenerator;
pub use side_tree::{Extreme, SideTree};
pub use snapshot::BookSnapshot;
