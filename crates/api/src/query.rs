//! Query-string parameter types shared by handlers.

use serde::Deserialize;
use vendora_core::types::DbId;

/// `?parent_id=` on the category listing. Absent lists top-level categories.
#[derive(Debug, Default, Deserialize)]
pub struct ParentParams {
    pub parent_id: Option<DbId>,
}

/// `?category_id=` selecting an explicit root for a vendor tree.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    pub category_id: Option<DbId>,
}

/// Filters on the vendor listing.
#[derive(Debug, Default, Deserialize)]
pub struct VendorFilterParams {
    /// Assigned root category.
    pub category_id: Option<DbId>,
    pub status: Option<String>,
}
