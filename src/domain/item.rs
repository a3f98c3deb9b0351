//! Input data items and node identifiers

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Default payload: every input field other than `id` and `children`.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Opaque node identifier.
///
/// Input ids may be strings or integers; both are kept in their string form,
/// so `1` and `"1"` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => NodeId(s),
            RawId::Signed(n) => NodeId(n.to_string()),
            RawId::Unsigned(n) => NodeId(n.to_string()),
        })
    }
}

/// One element of the nested construction input.
///
/// `children: None` means the item never had children data, which is distinct
/// from `Some(vec![])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeDataItem<T = Payload> {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeDataItem<T>>>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Default> TreeDataItem<T> {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            children: None,
            data: T::default(),
        }
    }
}

impl<T> TreeDataItem<T> {
    pub fn with_children(mut self, children: Vec<TreeDataItem<T>>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = data;
        self
    }
}

impl TreeDataItem<Payload> {
    /// Attach a payload field, e.g. a `title` used as row label.
    pub fn with_field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}
