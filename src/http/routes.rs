//! Router assembly: wires the four endpoints in spec.md §6 onto the
//! shared `ExchangeContext`, with the 1 MiB body cap and request tracing.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::exchange::ExchangeContext;

use super::handlers;

pub fn build_router(ctx: Arc<ExchangeContext>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/:assetID/data/marketPrice", get(handlers::market_price))
        .route("/api/:assetID/data/LOBSnapshot", get(handlers::book_snapshot))
        .route("/api/:assetID/data/LedgerSnapshot", get(handlers::ledger_snapshot))
        .route("/api/order", post(handlers::submit_order))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
