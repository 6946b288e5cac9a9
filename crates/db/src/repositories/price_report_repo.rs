//! Repository for the `vendor_price_reports` table.
//!
//! Rows are derived data: recomputed from the vendor, the override and the
//! category path, and upserted by (vendor, category).

use sqlx::PgPool;
use vendora_core::reporting::REPORT_LEVELS;
use vendora_core::types::DbId;

use crate::models::price_report::{NewPriceReport, VendorPriceReport};
use crate::models::vendor::Vendor;

/// Column list for the `vendor_price_reports` table.
const COLUMNS: &str = "id, vendor_id, category_id, contact_name, business_name, phone, price, \
    level1, level2, level3, level4, level5, path, created_at, updated_at";

/// Provides data access for denormalized price reports.
pub struct PriceReportRepo;

impl PriceReportRepo {
    /// Insert or fully replace the report for (vendor, category).
    pub async fn upsert(
        pool: &PgPool,
        report: &NewPriceReport,
    ) -> Result<VendorPriceReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO vendor_price_reports \
                (vendor_id, category_id, contact_name, business_name, phone, price, \
                 level1, level2, level3, level4, level5, path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT ON CONSTRAINT uq_vendor_price_reports_vendor_category \
             DO UPDATE SET \
                contact_name = EXCLUDED.contact_name, \
                business_name = EXCLUDED.business_name, \
                phone = EXCLUDED.phone, \
                price = EXCLUDED.price, \
                level1 = EXCLUDED.level1, \
                level2 = EXCLUDED.level2, \
                level3 = EXCLUDED.level3, \
                level4 = EXCLUDED.level4, \
                level5 = EXCLUDED.level5, \
                path = EXCLUDED.path \
             RETURNING {COLUMNS}"
        );
        let [l1, l2, l3, l4, l5] = &report.levels;
        sqlx::query_as::<_, VendorPriceReport>(&query)
            .bind(report.vendor_id)
            .bind(report.category_id)
            .bind(&report.contact_name)
            .bind(&report.business_name)
            .bind(&report.phone)
            .bind(report.price)
            .bind(l1.as_deref())
            .bind(l2.as_deref())
            .bind(l3.as_deref())
            .bind(l4.as_deref())
            .bind(l5.as_deref())
            .bind(&report.path)
            .fetch_one(pool)
            .await
    }

    /// Fetch the report for one (vendor, category) pair.
    pub async fn get(
        pool: &PgPool,
        vendor_id: DbId,
        category_id: DbId,
    ) -> Result<Option<VendorPriceReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendor_price_reports \
             WHERE vendor_id = $1 AND category_id = $2"
        );
        sqlx::query_as::<_, VendorPriceReport>(&query)
            .bind(vendor_id)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }

    /// All reports of a vendor.
    pub async fn list_for_vendor(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<VendorPriceReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendor_price_reports \
             WHERE vendor_id = $1 ORDER BY path, category_id"
        );
        sqlx::query_as::<_, VendorPriceReport>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// Rewrite the path columns of every report on `category_id`.
    ///
    /// Returns the number of rows updated.
    pub async fn update_path(
        pool: &PgPool,
        category_id: DbId,
        levels: &[Option<String>; REPORT_LEVELS],
        path: &[String],
    ) -> Result<u64, sqlx::Error> {
        let [l1, l2, l3, l4, l5] = levels;
        let result = sqlx::query(
            "UPDATE vendor_price_reports SET \
                level1 = $2, level2 = $3, level3 = $4, level4 = $5, level5 = $6, path = $7 \
             WHERE category_id = $1",
        )
        .bind(category_id)
        .bind(l1.as_deref())
        .bind(l2.as_deref())
        .bind(l3.as_deref())
        .bind(l4.as_deref())
        .bind(l5.as_deref())
        .bind(path)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Copy a vendor's current contact details onto all of its reports.
    ///
    /// Returns the number of rows updated.
    pub async fn update_contact(pool: &PgPool, vendor: &Vendor) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE vendor_price_reports SET \
                contact_name = $2, business_name = $3, phone = $4 \
             WHERE vendor_id = $1",
        )
        .bind(vendor.id)
        .bind(&vendor.contact_name)
        .bind(&vendor.business_name)
        .bind(&vendor.phone)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
