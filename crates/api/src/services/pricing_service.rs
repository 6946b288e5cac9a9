//! Vendor pricing: the price update protocol, seeding, and report upkeep.
//!
//! A price update runs four steps:
//! 1. Validate the input and load the vendor and category.
//! 2. Upsert the override (the source of truth).
//! 3. Recompute the denormalized report row from scratch.
//! 4. Respond with the override and, if step 3 succeeded, the report.
//!
//! Step 3 is best-effort. A failure there is logged and the response carries
//! `report: null`; the override is already committed.

use serde::Serialize;
use sqlx::PgPool;
use vendora_core::catalog::{path_names, CategoryIndex};
use vendora_core::error::CoreError;
use vendora_core::pricing::parse_price;
use vendora_core::reporting::level_columns;
use vendora_core::types::{DbId, Price};
use vendora_db::models::price_override::{PriceOverride, VendorPricingRow};
use vendora_db::models::price_report::{NewPriceReport, VendorPriceReport};
use vendora_db::models::vendor::Vendor;
use vendora_db::repositories::{CategoryRepo, PriceOverrideRepo, PriceReportRepo};

use super::catalog_service::resolve_path;
use super::{ensure_category_exists, ensure_vendor_exists};
use crate::error::AppResult;

/// Result of a price update.
#[derive(Debug, Serialize)]
pub struct PriceUpdateOutcome {
    #[serde(rename = "override")]
    pub price_override: PriceOverride,
    pub report: Option<VendorPriceReport>,
}

/// Set a vendor's price for one category.
pub async fn update_price(
    pool: &PgPool,
    vendor_id: DbId,
    category_id: Option<DbId>,
    raw_price: &serde_json::Value,
    max_depth: usize,
) -> AppResult<PriceUpdateOutcome> {
    // 1. Validate.
    let category_id = category_id
        .ok_or_else(|| CoreError::Validation("category_id is required".to_string()))?;
    let price = parse_price(raw_price)?;
    let vendor = ensure_vendor_exists(pool, vendor_id).await?;
    ensure_category_exists(pool, category_id).await?;

    // 2. Upsert the override.
    let price_override = PriceOverrideRepo::upsert(pool, vendor.id, category_id, price).await?;
    tracing::info!(vendor_id, category_id, price = %price, "Vendor price updated");

    // 3. Recompute the report.
    let report = match record_report(pool, &vendor, category_id, price, max_depth).await {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::error!(
                vendor_id,
                category_id,
                error = %e,
                "Failed to refresh vendor price report"
            );
            None
        }
    };

    // 4. Respond.
    Ok(PriceUpdateOutcome {
        price_override,
        report,
    })
}

/// Copy category defaults into the vendor's overrides where none exist.
///
/// Idempotent: concurrent or repeated calls settle on one row per category.
/// Returns the number of rows inserted.
pub async fn ensure_seeded(pool: &PgPool, vendor_id: DbId) -> AppResult<u64> {
    let inserted = PriceOverrideRepo::seed_defaults(pool, vendor_id).await?;
    if inserted > 0 {
        tracing::info!(vendor_id, inserted, "Seeded vendor prices from category defaults");
    }
    Ok(inserted)
}

/// Every category with the vendor's effective price.
///
/// A vendor with no overrides at all is seeded first.
pub async fn list_pricing(pool: &PgPool, vendor_id: DbId) -> AppResult<Vec<VendorPricingRow>> {
    ensure_vendor_exists(pool, vendor_id).await?;
    if PriceOverrideRepo::count_for_vendor(pool, vendor_id).await? == 0 {
        ensure_seeded(pool, vendor_id).await?;
    }
    Ok(PriceOverrideRepo::list_pricing(pool, vendor_id).await?)
}

/// One category with the vendor's effective price.
pub async fn get_pricing(
    pool: &PgPool,
    vendor_id: DbId,
    category_id: DbId,
) -> AppResult<VendorPricingRow> {
    ensure_vendor_exists(pool, vendor_id).await?;
    PriceOverrideRepo::get_pricing(pool, vendor_id, category_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Category",
                id: category_id,
            }
            .into()
        })
}

/// All denormalized report rows of a vendor.
pub async fn list_reports(pool: &PgPool, vendor_id: DbId) -> AppResult<Vec<VendorPriceReport>> {
    ensure_vendor_exists(pool, vendor_id).await?;
    Ok(PriceReportRepo::list_for_vendor(pool, vendor_id).await?)
}

/// Rebuild the report row for (vendor, category) from current data.
pub async fn record_report(
    pool: &PgPool,
    vendor: &Vendor,
    category_id: DbId,
    price: Price,
    max_depth: usize,
) -> AppResult<VendorPriceReport> {
    let path = resolve_path(pool, category_id, max_depth).await?;
    let report = NewPriceReport::compose(vendor, category_id, price, path);
    Ok(PriceReportRepo::upsert(pool, &report).await?)
}

/// Rewrite report paths for every category under `category_id` (inclusive).
///
/// Called after a rename, since every descendant's path contains the old
/// name. Returns the number of report rows touched.
pub async fn refresh_subtree_reports(
    pool: &PgPool,
    category_id: DbId,
    max_depth: usize,
) -> AppResult<u64> {
    let (ancestors, subtree) = tokio::try_join!(
        CategoryRepo::list_ancestry(pool, category_id, max_depth),
        CategoryRepo::list_subtree(pool, category_id),
    )?;
    let subtree_ids: Vec<DbId> = subtree.iter().map(|c| c.id).collect();
    let index = CategoryIndex::from_ordered(ancestors.into_iter().chain(subtree));

    let mut touched = 0;
    for id in subtree_ids {
        let path = path_names(&index, id, max_depth)?;
        touched += PriceReportRepo::update_path(pool, id, &level_columns(&path), &path).await?;
    }

    tracing::debug!(category_id, touched, "Refreshed report paths for subtree");
    Ok(touched)
}

/// Copy a vendor's contact details onto all of its report rows.
pub async fn refresh_vendor_reports(pool: &PgPool, vendor: &Vendor) -> AppResult<u64> {
    let touched = PriceReportRepo::update_contact(pool, vendor).await?;
    tracing::debug!(vendor_id = vendor.id, touched, "Refreshed report contact details");
    Ok(touched)
}
