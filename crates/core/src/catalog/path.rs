//! Ancestor walks from a category up towards its root.

use std::collections::HashSet;

use super::{CatalogEntry, CategoryIndex};
use crate::error::CoreError;
use crate::types::DbId;

/// Ancestor chain of `leaf`, ordered root first and ending with `leaf`.
///
/// The walk stops silently at the first parent id missing from the index,
/// so a category whose parent was deleted yields a chain that starts at the
/// deepest surviving ancestor.
pub fn ancestry<T: CatalogEntry>(
    index: &CategoryIndex<T>,
    leaf: DbId,
    max_depth: usize,
) -> Result<Vec<&T>, CoreError> {
    let mut current = index.get(leaf).ok_or(CoreError::NotFound {
        entity: "Category",
        id: leaf,
    })?;

    let mut chain = vec![current];
    let mut seen = HashSet::from([leaf]);

    while let Some(parent_id) = current.parent_id() {
        let Some(parent) = index.get(parent_id) else {
            break;
        };
        if !seen.insert(parent_id) {
            return Err(CoreError::CycleDetected {
                category_id: parent_id,
            });
        }
        if chain.len() >= max_depth {
            return Err(CoreError::DepthLimitExceeded { limit: max_depth });
        }
        chain.push(parent);
        current = parent;
    }

    chain.reverse();
    Ok(chain)
}

/// Category names along the ancestor chain of `leaf`, root first.
pub fn path_names<T: CatalogEntry>(
    index: &CategoryIndex<T>,
    leaf: DbId,
    max_depth: usize,
) -> Result<Vec<String>, CoreError> {
    Ok(ancestry(index, leaf, max_depth)?
        .into_iter()
        .map(|entry| entry.name().to_string())
        .collect())
}

/// Id of the highest reachable ancestor of `id` (itself when top-level).
pub fn top_level_ancestor<T: CatalogEntry>(
    index: &CategoryIndex<T>,
    id: DbId,
    max_depth: usize,
) -> Result<DbId, CoreError> {
    let chain = ancestry(index, id, max_depth)?;
    Ok(chain.first().map(|entry| entry.id()).unwrap_or(id))
}
