//! checktree: a checkbox tree model for tree-view widgets
//!
//! Nodes can be expanded/collapsed for display and checked/unchecked for
//! multi-selection. Checking cascades down a subtree and re-derives the
//! tri-state (checked / indeterminate) of every ancestor.
//!
//! # Architecture
//!
//! - `domain`: the tree model (arena, registry, cascades, flattening, events)
//! - `application`: input loading, scripted operations, text rendering
//! - `cli`: command-line interface
//! - `config`: layered settings
//!
//! # Example
//! ```
//! use checktree::domain::{CheckTree, TreeDataItem};
//!
//! let mut tree: CheckTree = CheckTree::new(vec![
//!     TreeDataItem::new("1").with_children(vec![TreeDataItem::new("2"), TreeDataItem::new("3")]),
//! ]);
//! tree.check("2", true);
//!
//! let root = tree.get_by_id("1").unwrap();
//! assert!(root.indeterminate && !root.checked);
//! assert_eq!(tree.flatten().len(), 1);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
