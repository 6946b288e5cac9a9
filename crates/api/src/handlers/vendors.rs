//! Handlers for the `/vendors` resource and the vendor catalog tree.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vendora_core::types::DbId;
use vendora_db::models::vendor::{CreateVendor, UpdateVendor};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::{CategoryParams, VendorFilterParams};
use crate::response::DataResponse;
use crate::services::{catalog_service, ensure_vendor_exists, vendor_service};
use crate::state::AppState;

/// GET /api/v1/vendors?category_id=&status=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<VendorFilterParams>,
) -> AppResult<impl IntoResponse> {
    let vendors = vendor_service::list_vendors(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: vendors }))
}

/// POST /api/v1/vendors
///
/// Onboard a vendor and seed its prices from the catalog defaults.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateVendor>,
) -> AppResult<impl IntoResponse> {
    let vendor = vendor_service::create_vendor(&state.pool, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: vendor })))
}

/// GET /api/v1/vendors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let vendor = ensure_vendor_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: vendor }))
}

/// PUT /api/v1/vendors/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateVendor>,
) -> AppResult<impl IntoResponse> {
    let vendor = vendor_service::update_vendor(&state.pool, id, input).await?;
    Ok(Json(DataResponse { data: vendor }))
}

/// Request body for `PUT /vendors/{id}/location`.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// PUT /api/v1/vendors/{id}/location
pub async fn update_location(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(body): AppJson<LocationRequest>,
) -> AppResult<impl IntoResponse> {
    let vendor = vendor_service::update_location(&state.pool, id, body.lat, body.lng).await?;
    Ok(Json(DataResponse { data: vendor }))
}

/// GET /api/v1/vendors/{id}/categories?category_id=
///
/// The vendor's catalog as one resolved tree with effective prices.
pub async fn categories(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> AppResult<impl IntoResponse> {
    let catalog = catalog_service::vendor_tree(
        &state.pool,
        id,
        params.category_id,
        state.config.max_tree_depth,
    )
    .await?;
    Ok(Json(DataResponse { data: catalog }))
}
