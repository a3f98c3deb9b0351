//! Attach input-file context to I/O and parse failures

use std::fmt::Display;
use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Reading a tree input file failed before any parsing happened.
pub trait IoResultExt<T> {
    /// `action` names what was attempted, e.g. "read tree input".
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// The file was read but its contents are not a valid item list.
pub trait ParseResultExt<T> {
    fn with_input_context(self, origin: &Path) -> ApplicationResult<T>;
}

impl<T, E: Display> ParseResultExt<T> for Result<T, E> {
    fn with_input_context(self, origin: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::InvalidInput {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }
}
