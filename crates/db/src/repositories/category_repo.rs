//! Repository for the `categories` table.
//!
//! Sibling order everywhere is `sequence ASC, created_at DESC, id DESC`; the
//! trailing `id` makes the order total when timestamps collide.

use sqlx::PgPool;
use vendora_core::types::DbId;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Result of [`CategoryRepo::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryDeletion {
    Deleted,
    Missing,
    /// The category still has children; nothing was removed.
    HasChildren,
}

/// Column list for the `categories` table.
const COLUMNS: &str = "id, name, parent_id, sequence, price, image_url, terms, \
    visible_to_user, visible_to_vendor, created_at, updated_at";

/// Deterministic sibling ordering.
const SIBLING_ORDER: &str = "sequence ASC, created_at DESC, id DESC";

/// Provides CRUD and tree queries for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    ///
    /// When a parent is given it is locked `FOR KEY SHARE` in the same
    /// transaction as the insert, so a concurrent [`CategoryRepo::delete`]
    /// of the parent either waits and then sees the new child, or wins and
    /// makes this insert fail with `RowNotFound`.
    ///
    /// Sibling-name collisions surface as a unique violation on
    /// `uq_categories_root_name` or `uq_categories_sibling_name`.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(parent_id) = input.parent_id {
            sqlx::query("SELECT id FROM categories WHERE id = $1 FOR KEY SHARE")
                .bind(parent_id)
                .fetch_one(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO categories \
                (name, parent_id, sequence, price, image_url, terms, visible_to_user, visible_to_vendor) \
             VALUES ($1, $2, COALESCE($3, 0), $4, $5, $6, COALESCE($7, true), COALESCE($8, true)) \
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(input.parent_id)
            .bind(input.sequence)
            .bind(input.price)
            .bind(&input.image_url)
            .bind(&input.terms)
            .bind(input.visible_to_user)
            .bind(input.visible_to_vendor)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(category)
    }

    /// Find a category by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by exact name under `parent_id` (`None` = top level).
    pub async fn find_by_name_and_parent(
        pool: &PgPool,
        name: &str,
        parent_id: Option<DbId>,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             WHERE name = $1 AND parent_id IS NOT DISTINCT FROM $2"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .bind(parent_id)
            .fetch_optional(pool)
            .await
    }

    /// List the direct children of `parent_id` (`None` lists top-level
    /// categories) in sibling order.
    pub async fn list_children(
        pool: &PgPool,
        parent_id: Option<DbId>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             WHERE parent_id IS NOT DISTINCT FROM $1 \
             ORDER BY {SIBLING_ORDER}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// The first top-level category in sibling order.
    pub async fn find_root(pool: &PgPool) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             WHERE parent_id IS NULL \
             ORDER BY {SIBLING_ORDER} \
             LIMIT 1"
        );
        sqlx::query_as::<_, Category>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Every category, in sibling order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY {SIBLING_ORDER}");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// `root_id` and all of its descendants, in sibling order.
    ///
    /// `UNION` (not `UNION ALL`) discards revisited ids, so the recursion
    /// terminates even if the stored parent links contain a cycle.
    pub async fn list_subtree(pool: &PgPool, root_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "WITH RECURSIVE subtree AS ( \
                SELECT id FROM categories WHERE id = $1 \
                UNION \
                SELECT c.id FROM categories c JOIN subtree s ON c.parent_id = s.id \
             ) \
             SELECT {COLUMNS} FROM categories \
             WHERE id IN (SELECT id FROM subtree) \
             ORDER BY {SIBLING_ORDER}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(root_id)
            .fetch_all(pool)
            .await
    }

    /// `id` and its ancestors, following at most `max_depth` parent links.
    ///
    /// One level beyond the bound is fetched so callers can tell a chain
    /// that is exactly `max_depth` long from one that exceeds it. Row order
    /// is unspecified; callers rebuild the chain from `parent_id`.
    pub async fn list_ancestry(
        pool: &PgPool,
        id: DbId,
        max_depth: usize,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "WITH RECURSIVE chain AS ( \
                SELECT id, parent_id, 1 AS depth FROM categories WHERE id = $1 \
                UNION ALL \
                SELECT c.id, c.parent_id, chain.depth + 1 \
                FROM categories c JOIN chain ON c.id = chain.parent_id \
                WHERE chain.depth <= $2 \
             ) \
             SELECT {COLUMNS} FROM categories \
             WHERE id IN (SELECT id FROM chain)"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(i32::try_from(max_depth).unwrap_or(i32::MAX))
            .fetch_all(pool)
            .await
    }

    /// Number of direct children of `id`.
    pub async fn count_children(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Apply a partial update. Returns `None` if no row matched.
    ///
    /// Plain optional fields are merged with `COALESCE`; nullable columns take
    /// a "touched" flag so an explicit clear writes `NULL`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                name = COALESCE($2, name), \
                sequence = COALESCE($3, sequence), \
                price = CASE WHEN $4 THEN $5 ELSE price END, \
                image_url = CASE WHEN $6 THEN $7 ELSE image_url END, \
                terms = CASE WHEN $8 THEN $9 ELSE terms END, \
                visible_to_user = COALESCE($10, visible_to_user), \
                visible_to_vendor = COALESCE($11, visible_to_vendor) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.sequence)
            .bind(input.price.is_touched())
            .bind(input.price.value().copied())
            .bind(input.image_url.is_touched())
            .bind(input.image_url.value().map(String::as_str))
            .bind(input.terms.is_touched())
            .bind(input.terms.value().map(String::as_str))
            .bind(input.visible_to_user)
            .bind(input.visible_to_vendor)
            .fetch_optional(pool)
            .await
    }

    /// Delete exactly one category, but only while it has no children.
    ///
    /// The row is locked `FOR UPDATE` first, which waits out any in-flight
    /// child insert holding the parent `FOR KEY SHARE`. The guarded delete
    /// then runs as its own statement and sees every committed child.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<CategoryDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query("SELECT id FROM categories WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(CategoryDeletion::Missing);
        }

        let result = sqlx::query(
            "DELETE FROM categories WHERE id = $1 \
             AND NOT EXISTS (SELECT 1 FROM categories WHERE parent_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(CategoryDeletion::HasChildren);
        }

        tx.commit().await?;
        Ok(CategoryDeletion::Deleted)
    }
}
