//! Application layer: loading, scripted operations and rendering
//!
//! This layer orchestrates domain logic around file input and text output.

pub mod error;
pub mod error_ext;
pub mod loader;
pub mod ops;
pub mod render;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::{IoResultExt, ParseResultExt};
pub use loader::{load_items, load_tree, parse_items, InputFormat};
pub use ops::{apply_all, Operation};
