//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::item::NodeId;

/// Domain errors only arise from strict lookups and operation parsing.
/// Tree mutations themselves treat a missing id as a no-op.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("invalid operation '{input}': {reason}")]
    InvalidOperation { input: String, reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
