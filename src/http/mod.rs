//! HTTP surface (spec.md §6): the four endpoints bolted onto the
//! exchange's `axum` service.

mod dto;
mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::build_router;
