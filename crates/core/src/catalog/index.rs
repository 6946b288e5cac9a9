//! Arena index over a flat list of categories.

use std::collections::HashMap;

use super::CatalogEntry;
use crate::types::DbId;

/// Flat id -> entry map plus a `parent -> [child ids]` adjacency list.
///
/// Child lists keep the order in which entries were supplied, so callers
/// must pass entries already sorted in sibling order
/// (`sequence ASC, created_at DESC`). The index never re-sorts.
///
/// Entries whose parent is missing from the input are still indexed under
/// that parent id; they are simply unreachable from [`CategoryIndex::roots`].
#[derive(Debug, Clone)]
pub struct CategoryIndex<T> {
    entries: HashMap<DbId, T>,
    children: HashMap<Option<DbId>, Vec<DbId>>,
}

impl<T: CatalogEntry> CategoryIndex<T> {
    /// Build the index from entries in sibling order.
    ///
    /// A repeated id keeps its first occurrence.
    pub fn from_ordered(entries: impl IntoIterator<Item = T>) -> Self {
        let mut index = Self {
            entries: HashMap::new(),
            children: HashMap::new(),
        };
        for entry in entries {
            let id = entry.id();
            if index.entries.contains_key(&id) {
                continue;
            }
            index.children.entry(entry.parent_id()).or_default().push(id);
            index.entries.insert(id, entry);
        }
        index
    }

    pub fn get(&self, id: DbId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Ordered child ids of `parent` (`None` for top-level entries).
    pub fn children_of(&self, parent: Option<DbId>) -> &[DbId] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ordered ids of top-level entries.
    pub fn roots(&self) -> &[DbId] {
        self.children_of(None)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
