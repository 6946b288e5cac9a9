//! Vendor onboarding and profile updates.

use sqlx::PgPool;
use validator::Validate;
use vendora_core::error::CoreError;
use vendora_core::types::{DbId, Patch};
use vendora_core::vendor::{validate_location, validate_phone, validate_vendor_status};
use vendora_db::models::vendor::{CreateVendor, UpdateVendor, Vendor};
use vendora_db::repositories::VendorRepo;

use super::pricing_service::{ensure_seeded, refresh_vendor_reports};
use super::{ensure_category_exists, ensure_vendor_exists};
use crate::error::{AppError, AppResult};
use crate::query::VendorFilterParams;

/// Onboard a vendor and seed its prices from the catalog defaults.
///
/// Seeding is best-effort here; the pricing listing seeds again lazily if
/// this step did not run.
pub async fn create_vendor(pool: &PgPool, mut input: CreateVendor) -> AppResult<Vendor> {
    input.contact_name = input.contact_name.trim().to_string();
    input.business_name = input.business_name.trim().to_string();
    input.validate()?;
    input.phone = validate_phone(&input.phone)?;
    input.status = input
        .status
        .as_deref()
        .map(validate_vendor_status)
        .transpose()?
        .map(str::to_string);
    if let Some(root_id) = input.root_category_id {
        ensure_category_exists(pool, root_id).await?;
    }

    let vendor = VendorRepo::create(pool, &input).await?;
    tracing::info!(vendor_id = vendor.id, business_name = %vendor.business_name, "Vendor onboarded");

    if let Err(e) = ensure_seeded(pool, vendor.id).await {
        tracing::warn!(vendor_id = vendor.id, error = %e, "Initial price seeding failed");
    }
    Ok(vendor)
}

/// Update a vendor. Contact changes are copied onto its report rows.
pub async fn update_vendor(pool: &PgPool, id: DbId, mut input: UpdateVendor) -> AppResult<Vendor> {
    input.contact_name = input.contact_name.map(|s| s.trim().to_string());
    input.business_name = input.business_name.map(|s| s.trim().to_string());
    input.validate()?;
    ensure_vendor_exists(pool, id).await?;

    input.phone = input.phone.as_deref().map(validate_phone).transpose()?;
    input.status = input
        .status
        .as_deref()
        .map(validate_vendor_status)
        .transpose()?
        .map(str::to_string);
    if let Patch::Set(root_id) = input.root_category_id {
        ensure_category_exists(pool, root_id).await?;
    }

    let vendor = VendorRepo::update(pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id,
        }))?;

    if input.changes_contact() {
        if let Err(e) = refresh_vendor_reports(pool, &vendor).await {
            tracing::error!(vendor_id = id, error = %e, "Failed to refresh vendor reports");
        }
    }
    Ok(vendor)
}

/// Pin (or with both coordinates absent, clear) the vendor's home location.
pub async fn update_location(
    pool: &PgPool,
    id: DbId,
    lat: Option<f64>,
    lng: Option<f64>,
) -> AppResult<Vendor> {
    let location = validate_location(lat, lng)?;
    let vendor = VendorRepo::update_location(pool, id, location)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id,
        }))?;
    tracing::info!(vendor_id = id, location = ?location, "Vendor location updated");
    Ok(vendor)
}

/// List vendors with optional root-category and status filters.
pub async fn list_vendors(pool: &PgPool, filter: &VendorFilterParams) -> AppResult<Vec<Vendor>> {
    let status = filter
        .status
        .as_deref()
        .map(validate_vendor_status)
        .transpose()?;
    Ok(VendorRepo::list(pool, filter.category_id, status).await?)
}
