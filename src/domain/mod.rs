//! Domain layer: the checkbox tree model
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod events;
pub mod item;
pub mod snapshot;
pub mod tree;

pub use arena::{FlattenIter, TreeArena, TreeNode};
pub use error::{DomainError, DomainResult};
pub use events::{ObserverId, TreeEvent, TreeObserver};
pub use item::{NodeId, Payload, TreeDataItem};
pub use snapshot::{fingerprint, NodeSnapshot};
pub use tree::CheckTree;
