//! Arena-backed node storage and the node-level algorithms.
//!
//! Children are owned through the arena (forward edges), parents are plain
//! `Index` back edges. Tearing a subtree down frees its slots; generational
//! indices keep stale handles from aliasing new nodes.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::item::{NodeId, TreeDataItem};
use crate::domain::snapshot::{fingerprint, NodeSnapshot};

/// One element of a checkbox tree.
#[derive(Debug)]
pub struct TreeNode<T> {
    pub id: NodeId,
    /// Caller payload, opaque to the tree
    pub data: T,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Child indices; None if the node never had children data
    pub children: Option<Vec<Index>>,
    pub expanded: bool,
    pub checked: bool,
    pub indeterminate: bool,
}

impl<T> TreeNode<T> {
    fn new(id: NodeId, data: T, parent: Option<Index>) -> Self {
        Self {
            id,
            data,
            parent,
            children: None,
            expanded: false,
            checked: false,
            indeterminate: false,
        }
    }

    /// True iff children are present and non-empty.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn child_indices(&self) -> &[Index] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Storage for all nodes of one tree plus the id registry.
#[derive(Debug)]
pub struct TreeArena<T> {
    arena: Arena<TreeNode<T>>,
    registry: HashMap<NodeId, Index>,
}

impl<T> Default for TreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            registry: HashMap::new(),
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    /// O(1) registry lookup.
    pub fn index_of(&self, id: &str) -> Option<Index> {
        self.registry.get(id).copied()
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Every registered node, in registry order.
    pub fn registered(&self) -> impl Iterator<Item = &TreeNode<T>> + '_ {
        self.registry.values().filter_map(|&idx| self.arena.get(idx))
    }

    /// Construct a node and its nested children under `parent`.
    ///
    /// The new node is appended to the parent's children. Ids are registered
    /// after the whole subtree exists, children before their parent, so a later
    /// registration of a duplicate id replaces the earlier one.
    #[instrument(level = "trace", skip(self, item))]
    pub fn build(&mut self, item: TreeDataItem<T>, parent: Option<Index>) -> Index {
        let mut stack = Vec::new();
        let top = self.insert_item(item, parent, &mut stack);

        while let Some((item, parent_idx)) = stack.pop() {
            self.insert_item(item, Some(parent_idx), &mut stack);
        }

        self.register_subtree(top);
        top
    }

    fn insert_item(
        &mut self,
        item: TreeDataItem<T>,
        parent: Option<Index>,
        pending: &mut Vec<(TreeDataItem<T>, Index)>,
    ) -> Index {
        let TreeDataItem { id, children, data } = item;
        let idx = self.arena.insert(TreeNode::new(id, data, parent));

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.get_or_insert_with(Vec::new).push(idx);
            }
        }

        if let Some(children) = children {
            if let Some(node) = self.arena.get_mut(idx) {
                node.children = Some(Vec::with_capacity(children.len()));
            }
            // Reverse so children are linked left-to-right
            for child in children.into_iter().rev() {
                pending.push((child, idx));
            }
        }

        idx
    }

    fn register_subtree(&mut self, idx: Index) {
        for node_idx in self.postorder(idx) {
            if let Some(node) = self.arena.get(node_idx) {
                if let Some(previous) = self.registry.insert(node.id.clone(), node_idx) {
                    debug!(
                        "id {} registered twice, later node wins ({:?} -> {:?})",
                        node.id, previous, node_idx
                    );
                }
            }
        }
    }

    /// Distance from the root, computed from the parent chain.
    pub fn depth(&self, idx: Index) -> usize {
        let mut depth = 0;
        let mut current = self.arena.get(idx).and_then(|n| n.parent);
        while let Some(parent_idx) = current {
            depth += 1;
            current = self.arena.get(parent_idx).and_then(|n| n.parent);
        }
        depth
    }

    #[instrument(level = "trace", skip(self))]
    pub fn expand(&mut self, idx: Index, flag: bool) {
        if let Some(node) = self.arena.get_mut(idx) {
            node.expanded = flag;
        }
    }

    /// Set the check state of a node and its whole subtree, then re-derive
    /// every ancestor.
    #[instrument(level = "trace", skip(self))]
    pub fn check(&mut self, idx: Index, flag: bool) {
        self.set_subtree_checked(idx, flag);
        let parent = self.arena.get(idx).and_then(|n| n.parent);
        self.refresh_ancestors(parent);
    }

    fn set_subtree_checked(&mut self, idx: Index, flag: bool) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.get_mut(current) {
                node.checked = flag;
                node.indeterminate = false;
                stack.extend(node.child_indices().iter().rev().copied());
            }
        }
    }

    /// Recompute checked/indeterminate for `start` and each node above it.
    ///
    /// A node with zero children keeps its last `checked` value.
    fn refresh_ancestors(&mut self, start: Option<Index>) {
        let mut current = start;
        while let Some(idx) = current {
            let Some(node) = self.arena.get(idx) else {
                break;
            };
            let children = node.child_indices();
            let all_checked = !children.is_empty()
                && children
                    .iter()
                    .all(|&c| self.arena.get(c).is_some_and(|child| child.checked));
            let any_marked = children.iter().any(|&c| {
                self.arena
                    .get(c)
                    .is_some_and(|child| child.checked || child.indeterminate)
            });
            let keep_checked = children.is_empty() && node.checked;

            let Some(node) = self.arena.get_mut(idx) else {
                break;
            };
            node.checked = all_checked || keep_checked;
            node.indeterminate = !node.checked && any_marked;
            current = node.parent;
        }
    }

    /// Attach a new subtree under `parent`.
    ///
    /// A checked parent force-checks the new subtree. Ancestors are not
    /// re-derived.
    #[instrument(level = "trace", skip(self, item))]
    pub fn add(&mut self, parent: Index, item: TreeDataItem<T>) -> Option<Index> {
        let parent_checked = self.arena.get(parent)?.checked;
        let idx = self.build(item, Some(parent));
        if parent_checked {
            self.set_subtree_checked(idx, true);
        }
        Some(idx)
    }

    /// Detach a node, tear down its subtree and re-derive the former parent
    /// chain. Returns false if the handle is stale.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, idx: Index) -> bool {
        let Some(node) = self.arena.get(idx) else {
            return false;
        };
        let parent = node.parent;

        if let Some(parent_idx) = parent {
            if let Some(children) = self
                .arena
                .get_mut(parent_idx)
                .and_then(|p| p.children.as_mut())
            {
                children.retain(|&c| c != idx);
            }
        }

        for node_idx in self.postorder(idx) {
            if let Some(removed) = self.arena.remove(node_idx) {
                // Only drop the registry slot if it still points here
                if self.registry.get(&removed.id) == Some(&node_idx) {
                    self.registry.remove(&removed.id);
                }
            }
        }

        self.refresh_ancestors(parent);
        true
    }

    /// Visible pre-order rows starting at `idx`.
    pub fn flatten(&self, idx: Index) -> FlattenIter<'_, T> {
        FlattenIter::new(self, idx)
    }

    pub fn snapshot(&self, idx: Index) -> Option<NodeSnapshot<'_, T>> {
        let node = self.arena.get(idx)?;
        Some(snapshot_of(node, self.depth(idx)))
    }

    /// Full pre-order subtree, ignoring expansion.
    pub fn preorder(&self, idx: Index) -> PreOrderIterator<'_, T> {
        PreOrderIterator::new(self, idx)
    }

    /// Post-order handles of a subtree (children first, then self).
    fn postorder(&self, idx: Index) -> Vec<Index> {
        let mut order = Vec::new();
        let mut stack = vec![(idx, false)];
        while let Some((current, visited)) = stack.pop() {
            if visited {
                order.push(current);
                continue;
            }
            if let Some(node) = self.arena.get(current) {
                stack.push((current, true));
                for &child in node.child_indices().iter().rev() {
                    stack.push((child, false));
                }
            }
        }
        order
    }
}

fn snapshot_of<T>(node: &TreeNode<T>, depth: usize) -> NodeSnapshot<'_, T> {
    NodeSnapshot {
        id: &node.id,
        expanded: node.expanded,
        depth,
        checked: node.checked,
        indeterminate: node.indeterminate,
        has_children: node.has_children(),
        key: fingerprint(&node.id, node.checked, node.indeterminate, node.expanded),
        data: &node.data,
    }
}

/// Lazily walks the visible rows of a subtree: a node's children are only
/// entered when it is expanded.
pub struct FlattenIter<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<(Index, usize)>,
}

impl<'a, T> FlattenIter<'a, T> {
    fn new(arena: &'a TreeArena<T>, idx: Index) -> Self {
        let mut stack = Vec::new();
        if arena.get_node(idx).is_some() {
            stack.push((idx, arena.depth(idx)));
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for FlattenIter<'a, T> {
    type Item = NodeSnapshot<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current) {
                if node.expanded {
                    for &child in node.child_indices().iter().rev() {
                        self.stack.push((child, depth + 1));
                    }
                }
                return Some(snapshot_of(node, depth));
            }
        }
        None
    }
}

pub struct PreOrderIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<Index>,
}

impl<'a, T> PreOrderIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>, idx: Index) -> Self {
        Self {
            arena,
            stack: vec![idx],
        }
    }
}

impl<'a, T> Iterator for PreOrderIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.child_indices().iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
