//! Vendor entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vendora_core::types::{DbId, Patch, Timestamp};
use vendora_core::vendor::GeoPoint;

/// A row from the `vendors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vendor {
    pub id: DbId,
    pub contact_name: String,
    pub business_name: String,
    pub phone: String,
    pub root_category_id: Option<DbId>,
    pub status: String,
    /// Home location; both set or both `NULL`.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Vendor {
    pub fn location(&self) -> Option<GeoPoint> {
        Some(GeoPoint {
            lat: self.latitude?,
            lng: self.longitude?,
        })
    }
}

/// Contact subset returned alongside a vendor's resolved tree.
#[derive(Debug, Clone, Serialize)]
pub struct VendorSummary {
    pub id: DbId,
    pub contact_name: String,
    pub business_name: String,
    pub phone: String,
    pub location: Option<GeoPoint>,
}

impl From<&Vendor> for VendorSummary {
    fn from(vendor: &Vendor) -> Self {
        Self {
            id: vendor.id,
            contact_name: vendor.contact_name.clone(),
            business_name: vendor.business_name.clone(),
            phone: vendor.phone.clone(),
            location: vendor.location(),
        }
    }
}

/// DTO for onboarding a vendor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVendor {
    #[validate(length(min = 1, max = 200))]
    pub contact_name: String,
    #[validate(length(min = 1, max = 200))]
    pub business_name: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
    pub root_category_id: Option<DbId>,
    pub status: Option<String>,
}

/// DTO for updating a vendor. All fields optional.
///
/// `root_category_id: null` unassigns the vendor's root.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVendor {
    #[validate(length(min = 1, max = 200))]
    pub contact_name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub business_name: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub phone: Option<String>,
    #[serde(default)]
    pub root_category_id: Patch<DbId>,
    pub status: Option<String>,
}

impl UpdateVendor {
    /// Whether the update touches a field copied into price reports.
    pub fn changes_contact(&self) -> bool {
        self.contact_name.is_some() || self.business_name.is_some() || self.phone.is_some()
    }
}
