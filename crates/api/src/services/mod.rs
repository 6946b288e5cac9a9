//! Multi-step operations shared by handlers.
//!
//! Handlers stay thin: they parse the request, call one function here, and
//! wrap the result. Everything that touches more than one repository, or
//! that has a best-effort side effect, lives in this module.

pub mod catalog_service;
pub mod category_service;
pub mod pricing_service;
pub mod vendor_service;

use sqlx::PgPool;
use vendora_core::error::CoreError;
use vendora_core::types::DbId;
use vendora_db::models::category::Category;
use vendora_db::models::vendor::Vendor;
use vendora_db::repositories::{CategoryRepo, VendorRepo};

use crate::error::{AppError, AppResult};

/// Verify that a category exists, returning the full row.
pub async fn ensure_category_exists(pool: &PgPool, id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        })
    })
}

/// Verify that a vendor exists, returning the full row.
pub async fn ensure_vendor_exists(pool: &PgPool, id: DbId) -> AppResult<Vendor> {
    VendorRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id,
        })
    })
}
