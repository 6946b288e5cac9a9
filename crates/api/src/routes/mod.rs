pub mod categories;
pub mod health;
pub mod vendors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                                      list (?parent_id), create
/// /categories/{id}                                 get, update, delete
/// /categories/{id}/path                            breadcrumb names
///
/// /vendors                                         list (?category_id, ?status), create
/// /vendors/{id}                                    get, update
/// /vendors/{id}/categories                         resolved tree (?category_id)
/// /vendors/{id}/prices                             price update (PUT)
/// /vendors/{id}/pricing                            flat pricing list
/// /vendors/{id}/pricing/{category_id}              single pricing row
/// /vendors/{id}/price-reports                      denormalized reports
/// /vendors/{id}/preview/{category_id}              storefront preview
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/vendors", vendors::router())
}
