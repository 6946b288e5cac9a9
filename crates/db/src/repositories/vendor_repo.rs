//! Repository for the `vendors` table.

use sqlx::PgPool;
use vendora_core::types::DbId;

use vendora_core::vendor::GeoPoint;

use crate::models::vendor::{CreateVendor, UpdateVendor, Vendor};

/// Column list for the `vendors` table.
const COLUMNS: &str = "id, contact_name, business_name, phone, root_category_id, status, \
    latitude, longitude, created_at, updated_at";

/// Provides CRUD operations for vendors.
pub struct VendorRepo;

impl VendorRepo {
    /// Insert a new vendor. A missing status defaults to `Pending`.
    pub async fn create(pool: &PgPool, input: &CreateVendor) -> Result<Vendor, sqlx::Error> {
        let query = format!(
            "INSERT INTO vendors (contact_name, business_name, phone, root_category_id, status) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'Pending')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(&input.contact_name)
            .bind(&input.business_name)
            .bind(&input.phone)
            .bind(input.root_category_id)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a vendor by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE id = $1");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List vendors, newest first, optionally filtered by assigned root
    /// category and status.
    pub async fn list(
        pool: &PgPool,
        root_category_id: Option<DbId>,
        status: Option<&str>,
    ) -> Result<Vec<Vendor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vendors \
             WHERE ($1::BIGINT IS NULL OR root_category_id = $1) \
               AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(root_category_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a vendor. Only non-`None` fields are applied; the root
    /// category is tri-state so it can be unassigned.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVendor,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!(
            "UPDATE vendors SET \
                contact_name = COALESCE($2, contact_name), \
                business_name = COALESCE($3, business_name), \
                phone = COALESCE($4, phone), \
                root_category_id = CASE WHEN $5 THEN $6 ELSE root_category_id END, \
                status = COALESCE($7, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .bind(&input.contact_name)
            .bind(&input.business_name)
            .bind(&input.phone)
            .bind(input.root_category_id.is_touched())
            .bind(input.root_category_id.value().copied())
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear (`None`) the vendor's home location.
    pub async fn update_location(
        pool: &PgPool,
        id: DbId,
        location: Option<GeoPoint>,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!(
            "UPDATE vendors SET latitude = $2, longitude = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .bind(location.map(|p| p.lat))
            .bind(location.map(|p| p.lng))
            .fetch_optional(pool)
            .await
    }
}
