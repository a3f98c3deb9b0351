//! The checkbox tree: root list, id-based dispatch and selection notification.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{TreeArena, TreeNode};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::events::{ObserverId, Observers, TreeEvent, TreeObserver};
use crate::domain::item::{NodeId, Payload, TreeDataItem};
use crate::domain::snapshot::NodeSnapshot;

/// Mutable checkbox tree with O(1) id lookup.
///
/// Every lookup-based operation treats an unknown id as a silent no-op.
#[derive(Debug)]
pub struct CheckTree<T = Payload> {
    arena: TreeArena<T>,
    roots: Vec<Index>,
    observers: Observers,
}

impl<T> Default for CheckTree<T> {
    fn default() -> Self {
        Self {
            arena: TreeArena::new(),
            roots: Vec::new(),
            observers: Observers::default(),
        }
    }
}

impl<T> FromIterator<TreeDataItem<T>> for CheckTree<T> {
    fn from_iter<I: IntoIterator<Item = TreeDataItem<T>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> CheckTree<T> {
    /// Build one root per top-level item, sharing a single registry.
    #[instrument(level = "debug", skip(items))]
    pub fn new(items: impl IntoIterator<Item = TreeDataItem<T>>) -> Self {
        let mut tree = Self::default();
        for item in items {
            let idx = tree.arena.build(item, None);
            tree.roots.push(idx);
        }
        debug!(
            "built tree: {} roots, {} nodes",
            tree.roots.len(),
            tree.arena.len()
        );
        tree
    }

    pub fn get_by_id(&self, id: &str) -> Option<&TreeNode<T>> {
        self.arena.index_of(id).and_then(|idx| self.arena.get_node(idx))
    }

    /// Like [`get_by_id`](Self::get_by_id), but a missing id is an error.
    pub fn require(&self, id: &str) -> DomainResult<&TreeNode<T>> {
        self.get_by_id(id)
            .ok_or_else(|| DomainError::NodeNotFound(NodeId::from(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.arena.index_of(id).is_some()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn roots(&self) -> impl Iterator<Item = &TreeNode<T>> + '_ {
        self.roots.iter().filter_map(|&idx| self.arena.get_node(idx))
    }

    pub fn arena(&self) -> &TreeArena<T> {
        &self.arena
    }

    pub fn depth(&self, id: &str) -> Option<usize> {
        self.arena.index_of(id).map(|idx| self.arena.depth(idx))
    }

    pub fn snapshot(&self, id: &str) -> Option<NodeSnapshot<'_, T>> {
        self.arena.index_of(id).and_then(|idx| self.arena.snapshot(idx))
    }

    pub fn parent(&self, id: &str) -> Option<&TreeNode<T>> {
        self.get_by_id(id)
            .and_then(|node| node.parent)
            .and_then(|idx| self.arena.get_node(idx))
    }

    pub fn children(&self, id: &str) -> Vec<&TreeNode<T>> {
        self.get_by_id(id)
            .map(|node| {
                node.child_indices()
                    .iter()
                    .filter_map(|&idx| self.arena.get_node(idx))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Visible rows of every root, in root order.
    pub fn flatten(&self) -> Vec<NodeSnapshot<'_, T>> {
        self.flatten_iter().collect()
    }

    pub fn flatten_iter(&self) -> impl Iterator<Item = NodeSnapshot<'_, T>> + '_ {
        self.roots
            .iter()
            .flat_map(move |&idx| self.arena.flatten(idx))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn expand(&mut self, id: &str, flag: bool) {
        match self.arena.index_of(id) {
            Some(idx) => self.arena.expand(idx, flag),
            None => debug!("expand: no node with id {}", id),
        }
    }

    /// Set `expanded` on every registered node.
    #[instrument(level = "debug", skip(self))]
    pub fn expand_all(&mut self, flag: bool) {
        let indices: Vec<Index> = self
            .roots
            .iter()
            .flat_map(|&root| self.arena.preorder(root).map(|(idx, _)| idx))
            .collect();
        for idx in indices {
            self.arena.expand(idx, flag);
        }
    }

    /// Check or uncheck a node's subtree and re-derive its ancestors.
    ///
    /// Returns true and notifies observers once if the node exists.
    #[instrument(level = "debug", skip(self))]
    pub fn check(&mut self, id: &str, flag: bool) -> bool {
        let Some(idx) = self.arena.index_of(id) else {
            debug!("check: no node with id {}", id);
            return false;
        };
        self.arena.check(idx, flag);
        self.observers.emit(TreeEvent::SelectionChanged);
        true
    }

    /// All checked nodes, in registry order.
    pub fn get_checked_nodes(&self) -> Vec<&TreeNode<T>> {
        self.arena.registered().filter(|n| n.checked).collect()
    }

    /// All expanded nodes, in registry order.
    pub fn get_expanded_nodes(&self) -> Vec<&TreeNode<T>> {
        self.arena.registered().filter(|n| n.expanded).collect()
    }

    #[instrument(level = "debug", skip(self, item))]
    pub fn add(&mut self, parent_id: &str, item: TreeDataItem<T>) {
        match self.arena.index_of(parent_id) {
            Some(parent) => {
                self.arena.add(parent, item);
            }
            None => debug!("add: no parent with id {}", parent_id),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: &str) {
        let Some(idx) = self.arena.index_of(id) else {
            debug!("remove: no node with id {}", id);
            return;
        };
        self.roots.retain(|&root| root != idx);
        self.arena.remove(idx);
    }

    pub fn subscribe(&mut self, observer: impl TreeObserver + 'static) -> ObserverId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;
    use std::cell::Cell;
    use std::rc::Rc;

    fn fixture() -> CheckTree {
        testing::init_test_setup();
        CheckTree::new(vec![
            TreeDataItem::new("1").with_children(vec![
                TreeDataItem::new("2").with_children(vec![TreeDataItem::new("3")]),
                TreeDataItem::new("4"),
            ]),
            TreeDataItem::new("5"),
        ])
    }

    #[test]
    fn given_successful_check_when_observed_then_fires_once() {
        let mut tree = fixture();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        tree.subscribe(move |_: &TreeEvent| counter.set(counter.get() + 1));

        assert!(tree.check("3", true));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn given_missing_id_or_other_mutation_when_observed_then_silent() {
        let mut tree = fixture();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        tree.subscribe(move |_: &TreeEvent| counter.set(counter.get() + 1));

        assert!(!tree.check("missing", true));
        tree.expand("1", true);
        tree.add("1", TreeDataItem::new("6"));
        tree.remove("6");

        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn given_nested_node_when_querying_relations_then_resolves_parent_and_children() {
        let tree = fixture();

        assert_eq!(tree.parent("3").map(|n| n.id.as_str()), Some("2"));
        assert!(tree.parent("1").is_none());
        let children: Vec<_> = tree.children("1").iter().map(|n| n.id.to_string()).collect();
        assert_eq!(children, vec!["2", "4"]);
        assert_eq!(tree.depth("3"), Some(2));
        assert!(tree.require("missing").is_err());
    }

    #[test]
    fn given_expand_all_when_flattening_then_every_node_visible() {
        let mut tree = fixture();
        tree.expand_all(true);
        assert_eq!(tree.flatten().len(), 5);
        tree.expand_all(false);
        assert_eq!(tree.flatten().len(), 2);
    }
}
