//! Category catalog: naming rules, the in-memory category index, the
//! vendor tree builder, and ancestor path resolution.
//!
//! Categories form a forest linked by weak `parent_id` references. Nothing
//! at the storage layer forbids dangling parents or cycles, so every walk in
//! this module is bounded by a visited set and a maximum depth.

pub mod index;
pub mod path;
pub mod tree;

pub use index::CategoryIndex;
pub use path::{ancestry, path_names, top_level_ancestor};
pub use tree::{pick_root, ResolvedCategoryNode, TreeBuilder};

use crate::error::CoreError;
use crate::types::{DbId, Price};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default bound on the number of levels walked from a root (or leaf).
///
/// Building and walking a tree is iterative, but serializing a
/// [`ResolvedCategoryNode`] to JSON recurses once per level, so this bound
/// also caps the stack used when a preview response is written.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Maximum allowed length for a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 200;

/// Root category name that triggers seeding of the vendor status children.
pub const STATUS_ROOT_NAME: &str = "Status";

/// Children seeded under a newly created [`STATUS_ROOT_NAME`] root.
pub const STATUS_CHILDREN: &[&str] = &["Accepted", "Pending", "Rejected"];

/// Separator between clauses in a category's `terms` text.
pub const TERMS_DELIMITER: char = ',';

// ---------------------------------------------------------------------------
// Entry abstraction
// ---------------------------------------------------------------------------

/// Read access to the fields of a stored category that the catalog
/// algorithms need. Implemented by the persistence model.
pub trait CatalogEntry {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
    fn name(&self) -> &str;
    fn default_price(&self) -> Option<Price>;
    fn image_url(&self) -> Option<&str>;
    fn terms(&self) -> Option<&str>;
    fn visible_to_user(&self) -> bool;
    fn visible_to_vendor(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a category name and return its trimmed form.
pub fn validate_category_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name required".to_string()));
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name must not exceed {MAX_CATEGORY_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Names of the children that must be seeded right after creating a
/// category. Only a top-level "Status" category (case-insensitive) seeds
/// children.
pub fn seeded_children(name: &str, parent_id: Option<DbId>) -> &'static [&'static str] {
    if parent_id.is_none() && name.trim().eq_ignore_ascii_case(STATUS_ROOT_NAME) {
        STATUS_CHILDREN
    } else {
        &[]
    }
}

/// Split a `terms` string into trimmed, non-empty clauses.
pub fn split_terms(terms: &str) -> Vec<String> {
    terms
        .split(TERMS_DELIMITER)
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(str::to_string)
        .collect()
}
