//! Vendor catalog reads: resolved trees, storefront previews, and paths.
//!
//! A tree read is two queries issued together (the subtree under the chosen
//! root and the vendor's override map) followed by an in-memory merge. Reads
//! never write; seeding happens at onboarding and in the pricing listing.

use serde::Serialize;
use sqlx::PgPool;
use vendora_core::catalog::{
    path_names, pick_root, top_level_ancestor, CategoryIndex, ResolvedCategoryNode, TreeBuilder,
};
use vendora_core::error::CoreError;
use vendora_core::types::DbId;
use vendora_db::models::category::Category;
use vendora_db::models::vendor::{Vendor, VendorSummary};
use vendora_db::repositories::{CategoryRepo, PriceOverrideRepo};

use super::{ensure_category_exists, ensure_vendor_exists};
use crate::error::AppResult;

/// A vendor's catalog rendered as a single resolved tree.
#[derive(Debug, Serialize)]
pub struct VendorCatalog {
    pub vendor: VendorSummary,
    pub categories: ResolvedCategoryNode,
}

/// Storefront preview: the whole top-level tree that contains the selected
/// category, so the page can render breadcrumbs and siblings around it.
#[derive(Debug, Serialize)]
pub struct StorefrontPreview {
    pub vendor: VendorSummary,
    pub selected_category_id: DbId,
    pub path: Vec<String>,
    pub categories: ResolvedCategoryNode,
}

/// Resolve the vendor's catalog tree.
///
/// Root selection, in order:
/// 1. `category_id`, when given (404 if it does not exist);
/// 2. the vendor's assigned root, if that category still exists;
/// 3. the first top-level category;
/// 4. otherwise `NoRootFound`.
pub async fn vendor_tree(
    pool: &PgPool,
    vendor_id: DbId,
    category_id: Option<DbId>,
    max_depth: usize,
) -> AppResult<VendorCatalog> {
    let vendor = ensure_vendor_exists(pool, vendor_id).await?;
    let root_id = resolve_root(pool, &vendor, category_id).await?;
    let categories = build_tree(pool, vendor.id, root_id, max_depth).await?;

    tracing::debug!(
        vendor_id,
        root_id,
        nodes = categories.node_count(),
        "Resolved vendor catalog tree"
    );

    Ok(VendorCatalog {
        vendor: VendorSummary::from(&vendor),
        categories,
    })
}

/// Resolve the storefront preview around `category_id`.
pub async fn preview_tree(
    pool: &PgPool,
    vendor_id: DbId,
    category_id: DbId,
    max_depth: usize,
) -> AppResult<StorefrontPreview> {
    let vendor = ensure_vendor_exists(pool, vendor_id).await?;
    let index = ancestry_index(pool, category_id, max_depth).await?;
    let path = path_names(&index, category_id, max_depth)?;
    let top_id = top_level_ancestor(&index, category_id, max_depth)?;
    let categories = build_tree(pool, vendor.id, top_id, max_depth).await?;

    Ok(StorefrontPreview {
        vendor: VendorSummary::from(&vendor),
        selected_category_id: category_id,
        path,
        categories,
    })
}

/// Category names from the top-level ancestor down to `category_id`.
pub async fn resolve_path(pool: &PgPool, category_id: DbId, max_depth: usize) -> AppResult<Vec<String>> {
    let index = ancestry_index(pool, category_id, max_depth).await?;
    Ok(path_names(&index, category_id, max_depth)?)
}

/// Index over `category_id` and its ancestors. 404 if the category is missing.
pub(crate) async fn ancestry_index(
    pool: &PgPool,
    category_id: DbId,
    max_depth: usize,
) -> AppResult<CategoryIndex<Category>> {
    let rows = CategoryRepo::list_ancestry(pool, category_id, max_depth).await?;
    let index = CategoryIndex::from_ordered(rows);
    if !index.contains(category_id) {
        return Err(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }
        .into());
    }
    Ok(index)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn resolve_root(pool: &PgPool, vendor: &Vendor, requested: Option<DbId>) -> AppResult<DbId> {
    if let Some(id) = requested {
        return Ok(ensure_category_exists(pool, id).await?.id);
    }

    let assigned = match vendor.root_category_id {
        Some(id) => CategoryRepo::find_by_id(pool, id).await?.map(|c| c.id),
        None => None,
    };
    if assigned.is_none() {
        if let Some(stale) = vendor.root_category_id {
            tracing::warn!(
                vendor_id = vendor.id,
                root_category_id = stale,
                "Assigned root category no longer exists, falling back to first root"
            );
        }
    }

    let fallback = match assigned {
        Some(_) => None,
        None => CategoryRepo::find_root(pool).await?.map(|c| c.id),
    };

    Ok(pick_root(None, assigned, fallback)?)
}

async fn build_tree(
    pool: &PgPool,
    vendor_id: DbId,
    root_id: DbId,
    max_depth: usize,
) -> AppResult<ResolvedCategoryNode> {
    let (rows, overrides) = tokio::try_join!(
        CategoryRepo::list_subtree(pool, root_id),
        PriceOverrideRepo::price_map(pool, vendor_id),
    )?;

    let index = CategoryIndex::from_ordered(rows);
    let tree = TreeBuilder::new(&index, &overrides)
        .with_max_depth(max_depth)
        .build(root_id)?;
    Ok(tree)
}
