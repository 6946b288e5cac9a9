//! Route definitions for vendors, their pricing, and storefront previews.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{preview, pricing, vendors};
use crate::state::AppState;

/// Routes mounted at `/vendors`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /{id}                            -> get_by_id
/// PUT    /{id}                            -> update
/// PUT    /{id}/location                   -> update_location
/// GET    /{id}/categories                 -> categories
/// PUT    /{id}/prices                     -> update_price
/// GET    /{id}/pricing                    -> list_pricing
/// GET    /{id}/pricing/{category_id}      -> get_pricing
/// GET    /{id}/price-reports              -> list_reports
/// GET    /{id}/preview/{category_id}      -> preview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vendors::list).post(vendors::create))
        .route("/{id}", get(vendors::get_by_id).put(vendors::update))
        .route("/{id}/location", put(vendors::update_location))
        .route("/{id}/categories", get(vendors::categories))
        .route("/{id}/prices", put(pricing::update_price))
        .route("/{id}/pricing", get(pricing::list_pricing))
        .route("/{id}/pricing/{category_id}", get(pricing::get_pricing))
        .route("/{id}/price-reports", get(pricing::list_reports))
        .route("/{id}/preview/{category_id}", get(preview::preview))
}
