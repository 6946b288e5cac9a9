//! Denormalized vendor price report model.

use serde::Serialize;
use sqlx::FromRow;
use vendora_core::reporting::{level_columns, REPORT_LEVELS};
use vendora_core::types::{DbId, Price, Timestamp};

use super::vendor::Vendor;

/// A row from the `vendor_price_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VendorPriceReport {
    pub id: DbId,
    pub vendor_id: DbId,
    pub category_id: DbId,
    pub contact_name: String,
    pub business_name: String,
    pub phone: String,
    pub price: Price,
    pub level1: Option<String>,
    pub level2: Option<String>,
    pub level3: Option<String>,
    pub level4: Option<String>,
    pub level5: Option<String>,
    pub path: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A freshly computed report row, ready to upsert.
#[derive(Debug, Clone)]
pub struct NewPriceReport {
    pub vendor_id: DbId,
    pub category_id: DbId,
    pub contact_name: String,
    pub business_name: String,
    pub phone: String,
    pub price: Price,
    pub levels: [Option<String>; REPORT_LEVELS],
    pub path: Vec<String>,
}

impl NewPriceReport {
    /// Assemble a report from the vendor's contact details, the effective
    /// price, and the category's root-first path.
    pub fn compose(vendor: &Vendor, category_id: DbId, price: Price, path: Vec<String>) -> Self {
        Self {
            vendor_id: vendor.id,
            category_id,
            contact_name: vendor.contact_name.clone(),
            business_name: vendor.business_name.clone(),
            phone: vendor.phone.clone(),
            price,
            levels: level_columns(&path),
            path,
        }
    }
}
