//! Storefront preview handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use vendora_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::response::DataResponse;
use crate::services::catalog_service;
use crate::state::AppState;

/// GET /api/v1/vendors/{id}/preview/{category_id}
///
/// The top-level tree containing `category_id`, priced for the vendor, with
/// the breadcrumb path to the selected category. Visibility flags are
/// returned as stored; the storefront decides what to hide.
pub async fn preview(
    State(state): State<AppState>,
    AppPath((vendor_id, category_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let preview = catalog_service::preview_tree(
        &state.pool,
        vendor_id,
        category_id,
        state.config.max_tree_depth,
    )
    .await?;
    Ok(Json(DataResponse { data: preview }))
}
