//! Handlers for the four endpoints in spec.md §6.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum::body::Bytes;
use tracing::info;

use crate::book::{OrderType, Side, TimeInForce};
use crate::exchange::ExchangeContext;
use crate::ids::{AssetId, Price, Shares};
use crate::ledger::LedgerEntry;
use crate::matcher::OrderRequest;

use super::dto::{BookSnapshotResponse, LedgerSnapshotResponse, MarketPriceResponse, OrderAccepted, OrderSubmission};
use super::error::ApiError;

pub async fn market_price(
    State(ctx): State<Arc<ExchangeContext>>,
    Path(asset_id): Path<AssetId>,
) -> Result<Json<MarketPriceResponse>, ApiError> {
    let matcher = ctx.matcher(asset_id).ok_or(ApiError::UnknownAsset)?;
    Ok(Json(matcher.book().last_price()))
}

pub async fn book_snapshot(
    State(ctx): State<Arc<ExchangeContext>>,
    Path(asset_id): Path<AssetId>,
) -> Result<Json<BookSnapshotResponse>, ApiError> {
    let matcher = ctx.matcher(asset_id).ok_or(ApiError::UnknownAsset)?;
    let snapshot = matcher.book().snapshot();
    Ok(Json(BookSnapshotResponse([snapshot.bids, snapshot.asks])))
}

pub async fn ledger_snapshot(
    State(ctx): State<Arc<ExchangeContext>>,
    Path(asset_id): Path<AssetId>,
) -> Result<Json<LedgerSnapshotResponse>, ApiError> {
    if ctx.assets.metadata(asset_id).is_none() {
        return Err(ApiError::UnknownAsset);
    }
    let trades = ctx.ledger.asset_history(asset_id);
    Ok(Json(trades.iter().map(LedgerEntry::from).collect()))
}

pub async fn submit_order(
    State(ctx): State<Arc<ExchangeContext>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let submission: OrderSubmission =
        serde_json::from_slice(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;

    let side = match submission.side.as_str() {
        "buy" => Side::Buy,
        "sell" => Side::Sell,
        _ => return Err(ApiError::InvalidSide),
    };
    let order_type = match submission.order_type.as_str() {
        "market" => OrderType::Market,
        "limit" => OrderType::Limit,
        _ => return Err(ApiError::InvalidOrderType),
    };
    if submission.qty <= 0 {
        return Err(ApiError::InvalidQty);
    }
    let shares = submission.qty as Shares;

    let limit_price: Option<Price> = match order_type {
        OrderType::Limit => {
            let limit = submission
                .limit
                .filter(|&p| p > 0)
                .ok_or(ApiError::InvalidLimitPrice)?;
            Some(limit as Price)
        }
        OrderType::Market => None,
    };

    let matcher = ctx
        .matcher_for_symbol(&submission.symbol)
        .ok_or(ApiError::UnknownSymbol)?;

    if order_type == OrderType::Market {
        let has_liquidity = match side {
            Side::Buy => matcher.book().best_ask().is_some(),
            Side::Sell => matcher.book().best_bid().is_some(),
        };
        if !has_liquidity {
            return Err(ApiError::NoLiquidity);
        }
    }

    let time_in_force = match submission.time_in_force.as_str() {
        "ioc" => TimeInForce::Ioc,
        "gtc" => TimeInForce::Gtc,
        _ => TimeInForce::Day,
    };

    let request = OrderRequest {
        side,
        order_type,
        shares,
        limit_price,
        user_id: submission.user_id,
        time_in_force,
    };

    matcher
        .submit(request)
        .await
        .map_err(|_| ApiError::WorkerGone)?;

    info!(symbol = %submission.symbol, side = %side, qty = shares, "order accepted");

    Ok((
        StatusCode::CREATED,
        Json(OrderAccepted {
            message: "order accepted",
        }),
    ))
}
