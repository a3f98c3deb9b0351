//! Scripted tree operations, as given on the command line
//!
//! Syntax: `expand:ID`, `collapse:ID`, `check:ID`, `uncheck:ID`, `remove:ID`,
//! `add:PARENT=JSON`, `expand-all`, `collapse-all`.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::domain::{CheckTree, DomainError, DomainResult, TreeDataItem};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Expand(String),
    Collapse(String),
    Check(String),
    Uncheck(String),
    Remove(String),
    Add { parent: String, item: TreeDataItem },
    ExpandAll,
    CollapseAll,
}

impl Operation {
    /// Id the operation targets, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Operation::Expand(id)
            | Operation::Collapse(id)
            | Operation::Check(id)
            | Operation::Uncheck(id)
            | Operation::Remove(id) => Some(id),
            Operation::Add { parent, .. } => Some(parent),
            Operation::ExpandAll | Operation::CollapseAll => None,
        }
    }

    /// Apply to `tree`; an operation naming an unknown id fails instead of
    /// silently doing nothing.
    #[instrument(level = "debug", skip(tree))]
    pub fn apply(&self, tree: &mut CheckTree) -> DomainResult<()> {
        if let Some(id) = self.target() {
            tree.require(id)?;
        }
        match self {
            Operation::Expand(id) => tree.expand(id, true),
            Operation::Collapse(id) => tree.expand(id, false),
            Operation::Check(id) => {
                tree.check(id, true);
            }
            Operation::Uncheck(id) => {
                tree.check(id, false);
            }
            Operation::Remove(id) => tree.remove(id),
            Operation::Add { parent, item } => tree.add(parent, item.clone()),
            Operation::ExpandAll => tree.expand_all(true),
            Operation::CollapseAll => tree.expand_all(false),
        }
        Ok(())
    }
}

/// Apply operations in order, stopping at the first failure.
pub fn apply_all(tree: &mut CheckTree, ops: &[Operation]) -> DomainResult<()> {
    for op in ops {
        op.apply(tree)?;
    }
    debug!("applied {} operations", ops.len());
    Ok(())
}

impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidOperation {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };

        let id = || match arg {
            Some(a) if !a.is_empty() => Ok(a.to_string()),
            _ => Err(invalid("missing node id")),
        };

        match verb {
            "expand" => Ok(Operation::Expand(id()?)),
            "collapse" => Ok(Operation::Collapse(id()?)),
            "check" => Ok(Operation::Check(id()?)),
            "uncheck" => Ok(Operation::Uncheck(id()?)),
            "remove" => Ok(Operation::Remove(id()?)),
            "add" => {
                let arg = arg.ok_or_else(|| invalid("expected add:PARENT=JSON"))?;
                let (parent, json) = arg
                    .split_once('=')
                    .ok_or_else(|| invalid("expected add:PARENT=JSON"))?;
                let parent = parent.trim();
                if parent.is_empty() {
                    return Err(invalid("missing parent id"));
                }
                let item: TreeDataItem =
                    serde_json::from_str(json).map_err(|e| invalid(&e.to_string()))?;
                Ok(Operation::Add {
                    parent: parent.to_string(),
                    item,
                })
            }
            "expand-all" if arg.is_none() => Ok(Operation::ExpandAll),
            "collapse-all" if arg.is_none() => Ok(Operation::CollapseAll),
            _ => Err(invalid("unknown operation")),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Expand(id) => write!(f, "expand:{id}"),
            Operation::Collapse(id) => write!(f, "collapse:{id}"),
            Operation::Check(id) => write!(f, "check:{id}"),
            Operation::Uncheck(id) => write!(f, "uncheck:{id}"),
            Operation::Remove(id) => write!(f, "remove:{id}"),
            Operation::Add { parent, item } => {
                let json = serde_json::to_string(item).map_err(|_| fmt::Error)?;
                write!(f, "add:{parent}={json}")
            }
            Operation::ExpandAll => f.write_str("expand-all"),
            Operation::CollapseAll => f.write_str("collapse-all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("expand:1", Operation::Expand("1".into()))]
    #[case("collapse: 1", Operation::Collapse("1".into()))]
    #[case("check:3", Operation::Check("3".into()))]
    #[case("uncheck:3", Operation::Uncheck("3".into()))]
    #[case("remove:4", Operation::Remove("4".into()))]
    #[case("expand-all", Operation::ExpandAll)]
    #[case("collapse-all", Operation::CollapseAll)]
    fn given_valid_syntax_when_parsing_then_returns_operation(
        #[case] input: &str,
        #[case] expected: Operation,
    ) {
        assert_eq!(input.parse::<Operation>().unwrap(), expected);
    }

    #[rstest]
    #[case("expand")]
    #[case("check:")]
    #[case("toggle:1")]
    #[case("add:1")]
    #[case("add:={\"id\":\"6\"}")]
    #[case("add:1={not json}")]
    #[case("expand-all:1")]
    fn given_invalid_syntax_when_parsing_then_errors(#[case] input: &str) {
        let err = input.parse::<Operation>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation { .. }));
    }

    #[test]
    fn given_add_with_json_when_parsing_then_carries_item() {
        let op: Operation = r#"add:1={"id": "6", "title": "Node 6"}"#.parse().unwrap();
        match op {
            Operation::Add { parent, item } => {
                assert_eq!(parent, "1");
                assert_eq!(item.id.as_str(), "6");
                assert_eq!(item.data.get("title").and_then(|v| v.as_str()), Some("Node 6"));
            }
            other => panic!("unexpected operation: {other}"),
        }
    }

    #[test]
    fn given_operations_when_applied_then_run_in_order() {
        let mut tree = CheckTree::new(vec![
            TreeDataItem::new("1").with_children(vec![TreeDataItem::new("2")]),
        ]);
        let ops: Vec<Operation> = ["check:1", r#"add:1={"id":"3"}"#, "expand:1", "remove:2"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        apply_all(&mut tree, &ops).unwrap();

        let ids: Vec<_> = tree.flatten().iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(tree.get_by_id("3").unwrap().checked);
    }

    #[test]
    fn given_unknown_id_when_applying_then_reports_missing_node() {
        let mut tree = CheckTree::new(vec![TreeDataItem::new("1")]);
        let ops: Vec<Operation> = ["check:1", "remove:9", "expand:1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        let err = apply_all(&mut tree, &ops).unwrap_err();

        assert!(matches!(err, DomainError::NodeNotFound(ref id) if id.as_str() == "9"));
        assert!(tree.get_by_id("1").unwrap().checked);
        assert!(!tree.get_by_id("1").unwrap().expanded);
    }

    #[test]
    fn given_add_operation_when_displayed_then_reparses_to_same_item() {
        let op: Operation = r#"add:1={"id":"6","title":"Node 6"}"#.parse().unwrap();
        let reparsed: Operation = op.to_string().parse().unwrap();
        assert_eq!(reparsed, op);
    }
}
