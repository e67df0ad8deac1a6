//! # Single-Venue Matching Engine
//!
//! A thread-safe limit order book matching engine for one trading
//! venue: per-asset order books, price-time priority matching of market
//! and limit orders against resting liquidity, and a write-through
//! trade ledger that settles cash and share positions on every fill.
//!
//! ## Architecture
//!
//! - [`book`] — the core data structures and matching algorithm: price
//!   levels, side-trees, and the book itself.
//! - [`matcher`] — one bounded intake queue and one serial worker task
//!   per book; the queue is the only synchronization the matcher needs.
//! - [`ledger`] — the append-only trade log and the atomic cash/share
//!   transfer that backs every fill.
//! - [`users`] — user records: cash balance and per-asset share counts.
//! - [`assets`] — the symbol→asset registry and startup population.
//! - [`exchange`] — the context tying the above together for the HTTP
//!   layer.
//! - [`http`] — the `axum` service exposing market data and order
//!   intake.
//!
//! ## Concurrency model
//!
//! Each book has exactly one matcher task; books run fully in parallel
//! with each other. Within a book, every mutation happens on that one
//! task, so the book's data structures carry no locks on the hot path —
//! the bounded channel feeding the task is the synchronization
//! primitive. The ledger and user registry are shared across all books
//! and serialize their own mutations internally.

pub mod assets;
pub mod book;
pub mod config;
pub mod exchange;
pub mod http;
pub mod ids;
pub mod ledger;
pub mod matcher;
pub mod prelude;
pub mod users;
mod utils;
