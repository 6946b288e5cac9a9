//! Handlers for vendor pricing: price updates, the pricing list, and the
//! denormalized price reports.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vendora_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::services::pricing_service;
use crate::state::AppState;

/// Request body for `PUT /vendors/{id}/prices`.
///
/// `price` stays raw JSON so that numbers and numeric strings are both
/// accepted and validated in one place.
#[derive(Debug, Deserialize)]
pub struct PriceUpdateRequest {
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub price: serde_json::Value,
}

/// PUT /api/v1/vendors/{id}/prices
pub async fn update_price(
    State(state): State<AppState>,
    AppPath(vendor_id): AppPath<DbId>,
    AppJson(body): AppJson<PriceUpdateRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = pricing_service::update_price(
        &state.pool,
        vendor_id,
        body.category_id,
        &body.price,
        state.config.max_tree_depth,
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/vendors/{id}/pricing
pub async fn list_pricing(
    State(state): State<AppState>,
    AppPath(vendor_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let rows = pricing_service::list_pricing(&state.pool, vendor_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/vendors/{id}/pricing/{category_id}
pub async fn get_pricing(
    State(state): State<AppState>,
    AppPath((vendor_id, category_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let row = pricing_service::get_pricing(&state.pool, vendor_id, category_id).await?;
    Ok(Json(DataResponse { data: row }))
}

/// GET /api/v1/vendors/{id}/price-reports
pub async fn list_reports(
    State(state): State<AppState>,
    AppPath(vendor_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let reports = pricing_service::list_reports(&state.pool, vendor_id).await?;
    Ok(Json(DataResponse { data: reports }))
}
