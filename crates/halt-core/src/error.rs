use thiserror::Error;

use halt_model::{NodeKind, NodeName};

/// Registry misconfiguration.
///
/// Raised when nodes are registered, never while scanning for a job.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("node {name:?} registered as {expected} but built as {actual}")]
    WrongKind {
        name: NodeName,
        expected: NodeKind,
        actual: NodeKind,
    },
    #[error("node {0:?} is already registered")]
    DuplicateNode(NodeName),
    #[error("node name cannot be empty")]
    EmptyNodeName,
}
