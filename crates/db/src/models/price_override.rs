//! Per-vendor price override model.

use serde::Serialize;
use sqlx::FromRow;
use vendora_core::types::{DbId, Price, Timestamp};

/// A row from the `price_overrides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PriceOverride {
    pub id: DbId,
    pub vendor_id: DbId,
    pub category_id: DbId,
    pub price: Price,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One category as a vendor sees it: catalog default joined with the
/// vendor's override, if any.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VendorPricingRow {
    pub category_id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub default_price: Option<Price>,
    pub override_price: Option<Price>,
    pub vendor_price: Option<Price>,
}
