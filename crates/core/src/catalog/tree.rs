//! Vendor tree builder.
//!
//! Merges a category subtree with one vendor's price overrides into an
//! immutable [`ResolvedCategoryNode`] tree.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::{split_terms, CatalogEntry, CategoryIndex, DEFAULT_MAX_DEPTH};
use crate::error::CoreError;
use crate::pricing::resolve_vendor_price;
use crate::types::{DbId, Price};

/// A category merged with a vendor's override, with ordered children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCategoryNode {
    pub id: DbId,
    pub name: String,
    pub default_price: Option<Price>,
    pub vendor_price: Option<Price>,
    pub image_url: Option<String>,
    pub terms: Option<String>,
    pub term_clauses: Vec<String>,
    pub visible_to_user: bool,
    pub visible_to_vendor: bool,
    pub children: Vec<ResolvedCategoryNode>,
}

impl ResolvedCategoryNode {
    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: DbId) -> Option<&ResolvedCategoryNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Ids of every node in pre-order.
    pub fn ids(&self) -> Vec<DbId> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node.id);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Pick the catalog root, in priority order: an explicitly requested
/// category, the vendor's assigned root, then the first top-level category.
///
/// Callers resolve each candidate to `None` when it does not exist, so a
/// deleted assigned root silently falls through to the fallback.
pub fn pick_root<T>(
    requested: Option<T>,
    assigned: Option<T>,
    first_top_level: Option<T>,
) -> Result<T, CoreError> {
    requested
        .or(assigned)
        .or(first_top_level)
        .ok_or(CoreError::NoRootFound)
}

/// Builds resolved trees from a [`CategoryIndex`] and a vendor's override map.
///
/// The traversal is iterative with an explicit stack, so deep hierarchies do
/// not consume call stack. It fails with [`CoreError::CycleDetected`] when a
/// category is reached twice and with [`CoreError::DepthLimitExceeded`] when a
/// branch is deeper than the configured bound.
pub struct TreeBuilder<'a, T> {
    index: &'a CategoryIndex<T>,
    overrides: &'a HashMap<DbId, Price>,
    max_depth: usize,
}

struct Frame<'a> {
    node: ResolvedCategoryNode,
    pending: &'a [DbId],
    next: usize,
}

impl Frame<'_> {
    fn advance(&mut self) -> Option<DbId> {
        let id = self.pending.get(self.next).copied();
        if id.is_some() {
            self.next += 1;
        }
        id
    }
}

impl<'a, T: CatalogEntry> TreeBuilder<'a, T> {
    pub fn new(index: &'a CategoryIndex<T>, overrides: &'a HashMap<DbId, Price>) -> Self {
        Self {
            index,
            overrides,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Build the resolved tree rooted at `root_id`.
    pub fn build(&self, root_id: DbId) -> Result<ResolvedCategoryNode, CoreError> {
        let root = self.index.get(root_id).ok_or(CoreError::NotFound {
            entity: "Category",
            id: root_id,
        })?;

        let mut visited = HashSet::from([root_id]);
        let mut stack = vec![self.frame(root)];

        loop {
            let next_child = match stack.last_mut() {
                Some(frame) => frame.advance(),
                None => break,
            };

            match next_child {
                Some(child_id) => {
                    let Some(child) = self.index.get(child_id) else {
                        continue;
                    };
                    if !visited.insert(child_id) {
                        return Err(CoreError::CycleDetected {
                            category_id: child_id,
                        });
                    }
                    if stack.len() >= self.max_depth {
                        return Err(CoreError::DepthLimitExceeded {
                            limit: self.max_depth,
                        });
                    }
                    stack.push(self.frame(child));
                }
                None => {
                    let Some(finished) = stack.pop() else {
                        break;
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.node.children.push(finished.node),
                        None => return Ok(finished.node),
                    }
                }
            }
        }

        Err(CoreError::Internal(format!(
            "tree traversal for category {root_id} ended without a root"
        )))
    }

    fn frame(&self, entry: &T) -> Frame<'a> {
        Frame {
            node: self.resolve(entry),
            pending: self.index.children_of(Some(entry.id())),
            next: 0,
        }
    }

    fn resolve(&self, entry: &T) -> ResolvedCategoryNode {
        let default_price = entry.default_price();
        let override_price = self.overrides.get(&entry.id()).copied();
        ResolvedCategoryNode {
            id: entry.id(),
            name: entry.name().to_string(),
            default_price,
            vendor_price: resolve_vendor_price(override_price, default_price),
            image_url: entry.image_url().map(str::to_string),
            terms: entry.terms().map(str::to_string),
            term_clauses: entry.terms().map(split_terms).unwrap_or_default(),
            visible_to_user: entry.visible_to_user(),
            visible_to_vendor: entry.visible_to_vendor(),
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::index::test_support::{node, Node};
    use super::*;
    use assert_matches::assert_matches;

    fn no_overrides() -> HashMap<DbId, Price> {
        HashMap::new()
    }

    /// Root(1) with children B(3, seq 0, 50) then A(2, seq 1, 100), as the
    /// store would order them.
    fn scenario_index() -> CategoryIndex<Node> {
        CategoryIndex::from_ordered(vec![
            node(1, None, "Root", None),
            node(3, Some(1), "B", Some(50)),
            node(2, Some(1), "A", Some(100)),
        ])
    }

    #[test]
    fn test_build_without_overrides_uses_defaults_in_store_order() {
        let index = scenario_index();
        let overrides = no_overrides();
        let tree = TreeBuilder::new(&index, &overrides).build(1).unwrap();

        assert_eq!(tree.id, 1);
        assert_eq!(tree.vendor_price, None);
        let ids: Vec<_> = tree.children.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(tree.children[0].vendor_price, Some(Price::from(50)));
        assert_eq!(tree.children[1].vendor_price, Some(Price::from(100)));
    }

    #[test]
    fn test_override_takes_precedence_and_default_is_kept() {
        let index = scenario_index();
        let overrides = HashMap::from([(2, Price::from(120))]);
        let tree = TreeBuilder::new(&index, &overrides).build(1).unwrap();

        let a = tree.find(2).unwrap();
        assert_eq!(a.vendor_price, Some(Price::from(120)));
        assert_eq!(a.default_price, Some(Price::from(100)));
        let b = tree.find(3).unwrap();
        assert_eq!(b.vendor_price, Some(Price::from(50)));
    }

    #[test]
    fn test_override_on_category_without_default() {
        let index = scenario_index();
        let overrides = HashMap::from([(1, Price::from(10))]);
        let tree = TreeBuilder::new(&index, &overrides).build(1).unwrap();
        assert_eq!(tree.default_price, None);
        assert_eq!(tree.vendor_price, Some(Price::from(10)));
    }

    #[test]
    fn test_tree_contains_each_reachable_category_once() {
        let index = CategoryIndex::from_ordered(vec![
            node(1, None, "Tutor", None),
            node(2, Some(1), "Online", None),
            node(3, Some(1), "Offline", None),
            node(4, Some(2), "NEET", None),
            node(5, Some(4), "Chemistry", Some(500)),
            node(6, Some(4), "Physics", Some(450)),
            node(7, Some(3), "Home", Some(300)),
            node(8, None, "Other root", None),
            node(9, Some(8), "Unrelated", None),
        ]);
        let overrides = no_overrides();
        let tree = TreeBuilder::new(&index, &overrides).build(1).unwrap();

        let mut ids = tree.ids();
        assert_eq!(ids.len(), tree.node_count());
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_preorder_ids_follow_child_order() {
        let index = CategoryIndex::from_ordered(vec![
            node(1, None, "Root", None),
            node(2, Some(1), "First", None),
            node(4, Some(2), "First child", None),
            node(3, Some(1), "Second", None),
        ]);
        let overrides = no_overrides();
        let tree = TreeBuilder::new(&index, &overrides).build(1).unwrap();
        assert_eq!(tree.ids(), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_visibility_flags_pass_through_unfiltered() {
        let index = scenario_index();
        let overrides = no_overrides();
        let tree = TreeBuilder::new(&index, &overrides).build(1).unwrap();
        // Node ids 3 and 1 are odd, so the fixture marks them hidden from users.
        assert!(!tree.visible_to_user);
        assert!(!tree.find(3).unwrap().visible_to_user);
        assert!(tree.find(2).unwrap().visible_to_user);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_terms_are_split_into_clauses() {
        let mut leaf = node(2, Some(1), "Leaf", Some(5));
        leaf.terms = Some("Cash only, No refunds".to_string());
        let index = CategoryIndex::from_ordered(vec![node(1, None, "Root", None), leaf]);
        let overrides = no_overrides();
        let tree = TreeBuilder::new(&index, &overrides).build(1).unwrap();

        let leaf = tree.find(2).unwrap();
        assert_eq!(leaf.terms.as_deref(), Some("Cash only, No refunds"));
        assert_eq!(leaf.term_clauses, vec!["Cash only", "No refunds"]);
        assert!(tree.term_clauses.is_empty());
    }

    #[test]
    fn test_build_from_inner_node_only_includes_its_subtree() {
        let index = CategoryIndex::from_ordered(vec![
            node(1, None, "Root", None),
            node(2, Some(1), "Inner", None),
            node(3, Some(2), "Leaf", Some(1)),
            node(4, Some(1), "Sibling", None),
        ]);
        let overrides = no_overrides();
        let tree = TreeBuilder::new(&index, &overrides).build(2).unwrap();
        assert_eq!(tree.ids(), vec![2, 3]);
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let index = scenario_index();
        let overrides = no_overrides();
        let result = TreeBuilder::new(&index, &overrides).build(42);
        assert_matches!(result, Err(CoreError::NotFound { id: 42, .. }));
    }

    #[test]
    fn test_cycle_through_root_is_detected() {
        // 1 -> 2 -> 1: each claims the other as parent.
        let index = CategoryIndex::from_ordered(vec![
            node(1, Some(2), "A", None),
            node(2, Some(1), "B", None),
        ]);
        let overrides = no_overrides();
        let result = TreeBuilder::new(&index, &overrides).build(1);
        assert_matches!(result, Err(CoreError::CycleDetected { category_id: 1 }));
    }

    #[test]
    fn test_self_parent_is_detected() {
        let index = CategoryIndex::from_ordered(vec![node(7, Some(7), "Loop", None)]);
        let overrides = no_overrides();
        let result = TreeBuilder::new(&index, &overrides).build(7);
        assert_matches!(result, Err(CoreError::CycleDetected { category_id: 7 }));
    }

    #[test]
    fn test_depth_limit_is_enforced() {
        let chain: Vec<Node> = (1..=10)
            .map(|id| node(id, if id == 1 { None } else { Some(id - 1) }, "n", None))
            .collect();
        let index = CategoryIndex::from_ordered(chain);
        let overrides = no_overrides();

        let ok = TreeBuilder::new(&index, &overrides)
            .with_max_depth(10)
            .build(1)
            .unwrap();
        assert_eq!(ok.node_count(), 10);

        let result = TreeBuilder::new(&index, &overrides)
            .with_max_depth(9)
            .build(1);
        assert_matches!(result, Err(CoreError::DepthLimitExceeded { limit: 9 }));
    }

    #[test]
    fn test_deep_chain_does_not_overflow_the_stack() {
        let depth = 2_000;
        let chain: Vec<Node> = (1..=depth)
            .map(|id| node(id, if id == 1 { None } else { Some(id - 1) }, "n", None))
            .collect();
        let index = CategoryIndex::from_ordered(chain);
        let overrides = no_overrides();
        let tree = TreeBuilder::new(&index, &overrides)
            .with_max_depth(depth as usize)
            .build(1)
            .unwrap();
        assert_eq!(tree.ids().len(), depth as usize);
        assert_eq!(tree.node_count(), depth as usize);
        assert_eq!(tree.find(depth).map(|leaf| leaf.id), Some(depth));
        assert!(tree.find(depth + 1).is_none());
    }

    #[test]
    fn test_pick_root_priority() {
        assert_eq!(pick_root(Some(1), Some(2), Some(3)).unwrap(), 1);
        assert_eq!(pick_root(None, Some(2), Some(3)).unwrap(), 2);
        assert_eq!(pick_root(None, None, Some(3)).unwrap(), 3);
        assert_matches!(pick_root::<i64>(None, None, None), Err(CoreError::NoRootFound));
    }
}
