//! Category writes: create with sibling-name checks and status seeding,
//! partial update with report upkeep, and guarded delete.

use sqlx::PgPool;
use vendora_core::catalog::seeded_children;
use vendora_core::error::CoreError;
use vendora_core::types::DbId;
use vendora_db::models::category::{Category, CreateCategory, UpdateCategory};
use vendora_db::repositories::{CategoryDeletion, CategoryRepo};

use super::ensure_category_exists;
use super::pricing_service::refresh_subtree_reports;
use crate::error::{unique_violation, AppError, AppResult};

/// Create a category.
///
/// The name must be unused among its siblings (roots count as siblings of
/// each other). The check runs before the insert for a clear error, and the
/// unique index closes the race between concurrent creates.
///
/// Creating a top-level "Status" category also creates its
/// Accepted/Pending/Rejected children. Those inserts are best-effort: a
/// failure is logged and the parent is still returned.
pub async fn create_category(pool: &PgPool, input: CreateCategory) -> AppResult<Category> {
    if let Some(parent_id) = input.parent_id {
        ensure_category_exists(pool, parent_id).await?;
    }
    ensure_name_free(pool, &input.name, input.parent_id, None).await?;

    let category = CategoryRepo::create(pool, &input)
        .await
        .map_err(|e| match (e, input.parent_id) {
            // The parent was deleted between the check above and the insert.
            (sqlx::Error::RowNotFound, Some(parent_id)) => AppError::Core(CoreError::NotFound {
                entity: "Category",
                id: parent_id,
            }),
            (e, _) => duplicate_or(e, &input.name, input.parent_id),
        })?;
    tracing::info!(
        category_id = category.id,
        parent_id = ?category.parent_id,
        name = %category.name,
        "Category created"
    );

    seed_children(pool, &category).await;
    Ok(category)
}

/// Apply a partial update.
///
/// A rename is checked against siblings like a create, and afterwards the
/// stored report paths of the whole subtree are rewritten (best-effort).
pub async fn update_category(
    pool: &PgPool,
    id: DbId,
    input: UpdateCategory,
    max_depth: usize,
) -> AppResult<Category> {
    let existing = ensure_category_exists(pool, id).await?;

    let renamed = input
        .name
        .as_deref()
        .is_some_and(|name| name != existing.name);
    if renamed {
        if let Some(name) = input.name.as_deref() {
            ensure_name_free(pool, name, existing.parent_id, Some(id)).await?;
        }
    }

    let updated = CategoryRepo::update(pool, id, &input)
        .await
        .map_err(|e| {
            duplicate_or(
                e,
                input.name.as_deref().unwrap_or(&existing.name),
                existing.parent_id,
            )
        })?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    if renamed {
        if let Err(e) = refresh_subtree_reports(pool, id, max_depth).await {
            tracing::error!(category_id = id, error = %e, "Failed to refresh report paths after rename");
        }
    }

    Ok(updated)
}

/// Delete a single category.
///
/// Non-leaf categories are refused with a conflict; children are never
/// deleted or re-parented implicitly. The leaf check and the delete are one
/// locked operation, so a child created concurrently cannot be orphaned.
pub async fn delete_category(pool: &PgPool, id: DbId) -> AppResult<()> {
    match CategoryRepo::delete(pool, id).await? {
        CategoryDeletion::Deleted => {
            tracing::info!(category_id = id, "Category deleted");
            Ok(())
        }
        CategoryDeletion::Missing => Err(CoreError::NotFound {
            entity: "Category",
            id,
        }
        .into()),
        CategoryDeletion::HasChildren => Err(CoreError::Conflict(format!(
            "Category {id} has child categories; delete them first"
        ))
        .into()),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fail with `DuplicateName` if a sibling other than `except` uses `name`.
async fn ensure_name_free(
    pool: &PgPool,
    name: &str,
    parent_id: Option<DbId>,
    except: Option<DbId>,
) -> AppResult<()> {
    match CategoryRepo::find_by_name_and_parent(pool, name, parent_id).await? {
        Some(other) if Some(other.id) != except => Err(CoreError::DuplicateName {
            name: name.to_string(),
            parent_id,
        }
        .into()),
        _ => Ok(()),
    }
}

/// Map a sibling-name unique violation to `DuplicateName`; pass anything
/// else through.
fn duplicate_or(err: sqlx::Error, name: &str, parent_id: Option<DbId>) -> AppError {
    let sibling_clash = unique_violation(&err).is_some_and(|c| c.starts_with("uq_categories_"));
    if sibling_clash {
        AppError::Core(CoreError::DuplicateName {
            name: name.to_string(),
            parent_id,
        })
    } else {
        AppError::Database(err)
    }
}

async fn seed_children(pool: &PgPool, parent: &Category) {
    for (sequence, name) in (0..).zip(seeded_children(&parent.name, parent.parent_id)) {
        let input = CreateCategory {
            sequence: Some(sequence),
            ..CreateCategory::named(*name, Some(parent.id))
        };
        match CategoryRepo::create(pool, &input).await {
            Ok(child) => {
                tracing::debug!(parent_id = parent.id, category_id = child.id, name, "Seeded child category");
            }
            Err(e) => {
                tracing::error!(parent_id = parent.id, name, error = %e, "Failed to seed child category");
            }
        }
    }
}
