//! `ApiError`: maps every rejected submission to the HTTP status codes
//! in spec.md §6/§7, carrying a JSON `{"error": "..."}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown asset id")]
    UnknownAsset,
    #[error("malformed request body: {0}")]
    Malformed(String),
    #[error("symbol does not exist")]
    UnknownSymbol,
    #[error("side must be \"buy\" or \"sell\"")]
    InvalidSide,
    #[error("type must be \"market\" or \"limit\"")]
    InvalidOrderType,
    #[error("qty must be greater than 0")]
    InvalidQty,
    #[error("limit price is required for limit orders and must be greater than 0")]
    InvalidLimitPrice,
    #[error("order cancelled due to a lack of liquidity")]
    NoLiquidity,
    #[error("exchange is shutting down")]
    WorkerGone,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::UnknownAsset => StatusCode::NOT_FOUND,
            ApiError::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnknownSymbol
            | ApiError::InvalidSide
            | ApiError::InvalidOrderType
            | ApiError::InvalidQty
            | ApiError::InvalidLimitPrice => StatusCode::BAD_REQUEST,
            ApiError::NoLiquidity => StatusCode::NOT_ACCEPTABLE,
            ApiError::WorkerGone => StatusCode::SERVICE_UNAVAILABLE,
        };

        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
