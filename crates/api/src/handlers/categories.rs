//! Handlers for the `/categories` resource.
//!
//! Admin CRUD over the category forest plus breadcrumb paths.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vendora_core::catalog::validate_category_name;
use vendora_core::error::CoreError;
use vendora_core::pricing::parse_optional_price;
use vendora_core::types::{DbId, Patch};
use vendora_db::models::category::{CreateCategory, UpdateCategory};
use vendora_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::ParentParams;
use crate::response::DataResponse;
use crate::services::{catalog_service, category_service, ensure_category_exists};
use crate::state::AppState;

/// Request body for creating a category.
///
/// `price` accepts a JSON number or a numeric string; `null` or `""` leave
/// the category without a default price.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub parent_id: Option<DbId>,
    pub sequence: Option<i32>,
    #[serde(default)]
    pub price: serde_json::Value,
    pub image_url: Option<String>,
    pub terms: Option<String>,
    pub visible_to_user: Option<bool>,
    pub visible_to_vendor: Option<bool>,
}

impl CreateCategoryRequest {
    fn into_input(self) -> AppResult<CreateCategory> {
        Ok(CreateCategory {
            name: validate_category_name(self.name.as_deref().unwrap_or_default())?,
            parent_id: self.parent_id,
            sequence: self.sequence,
            price: parse_optional_price(&self.price)?,
            image_url: self.image_url.and_then(non_blank),
            terms: self.terms.and_then(non_blank),
            visible_to_user: self.visible_to_user,
            visible_to_vendor: self.visible_to_vendor,
        })
    }
}

/// Request body for a partial category update.
///
/// Absent fields are left alone. For `price`, `image_url` and `terms`, an
/// explicit `null` (or empty string) clears the value. `parent_id` cannot be
/// changed and is ignored if sent.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub sequence: Option<i32>,
    #[serde(default)]
    pub price: Patch<serde_json::Value>,
    #[serde(default)]
    pub image_url: Patch<String>,
    #[serde(default)]
    pub terms: Patch<String>,
    pub visible_to_user: Option<bool>,
    pub visible_to_vendor: Option<bool>,
}

impl UpdateCategoryRequest {
    fn into_input(self) -> AppResult<UpdateCategory> {
        Ok(UpdateCategory {
            name: self
                .name
                .as_deref()
                .map(validate_category_name)
                .transpose()?,
            sequence: self.sequence,
            price: self.price.try_map(|raw| parse_optional_price(&raw))?,
            image_url: self.image_url.try_map(|s| Ok::<_, CoreError>(non_blank(s)))?,
            terms: self.terms.try_map(|s| Ok::<_, CoreError>(non_blank(s)))?,
            visible_to_user: self.visible_to_user,
            visible_to_vendor: self.visible_to_vendor,
        })
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/categories?parent_id=
///
/// List the children of `parent_id`, or the top-level categories when it is
/// absent, in display order.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ParentParams>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_children(&state.pool, params.parent_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let category = category_service::create_category(&state.pool, body.into_input()?).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = ensure_category_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(body): AppJson<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let category = category_service::update_category(
        &state.pool,
        id,
        body.into_input()?,
        state.config.max_tree_depth,
    )
    .await?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Refused with 409 while the category still has children.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    category_service::delete_category(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/categories/{id}/path
///
/// Category names from the top-level ancestor down to `id`.
pub async fn path(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let names = catalog_service::resolve_path(&state.pool, id, state.config.max_tree_depth).await?;
    Ok(Json(DataResponse { data: names }))
}
