//! Plain-text rendering of flattened rows and full structure

use itertools::Itertools;
use termtree::Tree;

use crate::config::{Markers, Settings};
use crate::domain::{CheckTree, NodeSnapshot, Payload, TreeNode};

/// Selection state of a row, used to pick marker and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
    Indeterminate,
}

impl CheckState {
    pub fn of(checked: bool, indeterminate: bool) -> Self {
        match (checked, indeterminate) {
            (true, _) => CheckState::Checked,
            (false, true) => CheckState::Indeterminate,
            (false, false) => CheckState::Unchecked,
        }
    }

    pub fn marker<'a>(&self, markers: &'a Markers) -> &'a str {
        match self {
            CheckState::Checked => &markers.checked,
            CheckState::Unchecked => &markers.unchecked,
            CheckState::Indeterminate => &markers.indeterminate,
        }
    }
}

/// One rendered row, split so the caller can colorize parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowParts {
    pub indent: String,
    pub toggle: String,
    pub state: CheckState,
    pub label: String,
    pub key: Option<String>,
}

impl RowParts {
    pub fn to_plain(&self, markers: &Markers) -> String {
        let mut line = format!(
            "{}{} {} {}",
            self.indent,
            self.toggle,
            self.state.marker(markers),
            self.label
        );
        if let Some(key) = &self.key {
            line.push_str(&format!("  #{key}"));
        }
        line
    }
}

/// Row label: the configured payload field if it is a string or number,
/// otherwise the node id.
pub fn label(id: &str, data: &Payload, label_field: &str) -> String {
    match data.get(label_field) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => id.to_string(),
    }
}

pub fn row_parts(row: &NodeSnapshot<'_, Payload>, settings: &Settings) -> RowParts {
    let markers = &settings.markers;
    let toggle = if !row.has_children {
        &markers.leaf
    } else if row.expanded {
        &markers.expanded
    } else {
        &markers.collapsed
    };

    RowParts {
        indent: " ".repeat(settings.indent * row.depth),
        toggle: toggle.clone(),
        state: CheckState::of(row.checked, row.indeterminate),
        label: label(row.id.as_str(), row.data, &settings.label_field),
        key: settings.show_keys.then(|| row.key.clone()),
    }
}

/// Flattened view as plain lines.
pub fn render_flat(tree: &CheckTree, settings: &Settings) -> Vec<String> {
    tree.flatten_iter()
        .map(|row| row_parts(&row, settings).to_plain(&settings.markers))
        .collect()
}

/// Ids of the given nodes, sorted for stable output.
pub fn sorted_ids<'a>(nodes: impl IntoIterator<Item = &'a TreeNode<Payload>>) -> Vec<String> {
    nodes
        .into_iter()
        .map(|n| n.id.to_string())
        .sorted()
        .collect()
}

/// Full structure (ignoring expansion) as one `termtree` per root.
pub fn to_termtrees(tree: &CheckTree, settings: &Settings) -> Vec<Tree<String>> {
    let arena = tree.arena();
    let node_line = |node: &TreeNode<Payload>| {
        format!(
            "{} {}",
            CheckState::of(node.checked, node.indeterminate).marker(&settings.markers),
            label(node.id.as_str(), &node.data, &settings.label_field)
        )
    };

    fn build(
        arena: &crate::domain::TreeArena<Payload>,
        node: &TreeNode<Payload>,
        line: &dyn Fn(&TreeNode<Payload>) -> String,
    ) -> Tree<String> {
        let leaves = node
            .child_indices()
            .iter()
            .filter_map(|&idx| arena.get_node(idx))
            .map(|child| build(arena, child, line))
            .collect::<Vec<_>>();
        Tree::new(line(node)).with_leaves(leaves)
    }

    tree.roots().map(|root| build(arena, root, &node_line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeDataItem;

    fn settings() -> Settings {
        Settings::default()
    }

    fn tree() -> CheckTree {
        CheckTree::new(vec![
            TreeDataItem::new("1")
                .with_field("title", "Node 1")
                .with_children(vec![TreeDataItem::new("2"), TreeDataItem::new("3")]),
        ])
    }

    #[test]
    fn given_partial_selection_when_rendering_then_uses_tristate_markers() {
        let mut tree = tree();
        tree.expand("1", true);
        tree.check("2", true);

        let lines = render_flat(&tree, &settings());

        assert_eq!(lines, vec!["▾ [-] Node 1", "    [x] 2", "    [ ] 3"]);
    }

    #[test]
    fn given_collapsed_parent_when_rendering_then_shows_collapsed_toggle() {
        let lines = render_flat(&tree(), &settings());
        assert_eq!(lines, vec!["▸ [ ] Node 1"]);
    }

    #[test]
    fn given_show_keys_when_rendering_then_appends_fingerprint() {
        let mut settings = settings();
        settings.show_keys = true;
        let lines = render_flat(&tree(), &settings);
        assert!(lines[0].contains("  #"));
    }

    #[test]
    fn given_collapsed_tree_when_converting_to_termtree_then_includes_all_nodes() {
        let rendered = to_termtrees(&tree(), &settings())
            .iter()
            .map(|t| t.to_string())
            .join("");
        assert!(rendered.contains("Node 1"));
        assert!(rendered.contains("[ ] 2"));
        assert!(rendered.contains("[ ] 3"));
    }
}
