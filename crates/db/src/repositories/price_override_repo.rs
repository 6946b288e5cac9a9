//! Repository for the `price_overrides` table.
//!
//! An override is the vendor tier on top of the catalog default price.

use std::collections::HashMap;

use sqlx::PgPool;
use vendora_core::types::{DbId, Price};

use crate::models::price_override::{PriceOverride, VendorPricingRow};

/// Column list for the `price_overrides` table.
const COLUMNS: &str = "id, vendor_id, category_id, price, created_at, updated_at";

/// Select list joining a category with one vendor's override (`po`).
const PRICING_COLUMNS: &str = "c.id AS category_id, c.name, c.parent_id, \
    c.price AS default_price, po.price AS override_price, \
    COALESCE(po.price, c.price) AS vendor_price";

/// Provides data access for per-vendor price overrides.
pub struct PriceOverrideRepo;

impl PriceOverrideRepo {
    /// Fetch the override for one (vendor, category) pair.
    pub async fn get(
        pool: &PgPool,
        vendor_id: DbId,
        category_id: DbId,
    ) -> Result<Option<PriceOverride>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM price_overrides \
             WHERE vendor_id = $1 AND category_id = $2"
        );
        sqlx::query_as::<_, PriceOverride>(&query)
            .bind(vendor_id)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }

    /// All overrides of a vendor.
    pub async fn list_for_vendor(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<PriceOverride>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM price_overrides WHERE vendor_id = $1 ORDER BY category_id"
        );
        sqlx::query_as::<_, PriceOverride>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// A vendor's overrides keyed by category id, in a single round trip.
    pub async fn price_map(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<HashMap<DbId, Price>, sqlx::Error> {
        let rows: Vec<(DbId, Price)> =
            sqlx::query_as("SELECT category_id, price FROM price_overrides WHERE vendor_id = $1")
                .bind(vendor_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().collect())
    }

    /// Insert or replace the override for (vendor, category). Last write wins.
    pub async fn upsert(
        pool: &PgPool,
        vendor_id: DbId,
        category_id: DbId,
        price: Price,
    ) -> Result<PriceOverride, sqlx::Error> {
        let query = format!(
            "INSERT INTO price_overrides (vendor_id, category_id, price) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_price_overrides_vendor_category \
             DO UPDATE SET price = EXCLUDED.price \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PriceOverride>(&query)
            .bind(vendor_id)
            .bind(category_id)
            .bind(price)
            .fetch_one(pool)
            .await
    }

    /// Number of overrides a vendor has.
    pub async fn count_for_vendor(pool: &PgPool, vendor_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM price_overrides WHERE vendor_id = $1")
                .bind(vendor_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Copy every category default price into the vendor's overrides.
    ///
    /// Categories without a default are skipped. Existing overrides are left
    /// untouched, so repeated or concurrent calls converge on one row per
    /// pair. Returns the number of rows inserted.
    pub async fn seed_defaults(pool: &PgPool, vendor_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO price_overrides (vendor_id, category_id, price) \
             SELECT $1, id, price FROM categories WHERE price IS NOT NULL \
             ON CONFLICT ON CONSTRAINT uq_price_overrides_vendor_category DO NOTHING",
        )
        .bind(vendor_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Every category joined with the vendor's override, in sibling order.
    pub async fn list_pricing(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<VendorPricingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {PRICING_COLUMNS} \
             FROM categories c \
             LEFT JOIN price_overrides po ON po.category_id = c.id AND po.vendor_id = $1 \
             ORDER BY c.sequence ASC, c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, VendorPricingRow>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// One category joined with the vendor's override.
    pub async fn get_pricing(
        pool: &PgPool,
        vendor_id: DbId,
        category_id: DbId,
    ) -> Result<Option<VendorPricingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {PRICING_COLUMNS} \
             FROM categories c \
             LEFT JOIN price_overrides po ON po.category_id = c.id AND po.vendor_id = $1 \
             WHERE c.id = $2"
        );
        sqlx::query_as::<_, VendorPricingRow>(&query)
            .bind(vendor_id)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }
}
