use thiserror::Error;

use halt_model::{NodeName, SlotIndex};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error("slot {slot} is busy")]
    SlotBusy { slot: SlotIndex },
    #[error("no idle slot on node {node:?}")]
    NoIdleSlot { node: NodeName },
    #[error("dispatch requires a tokio runtime")]
    NoRuntime,
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("job failed: {0}")]
    Failed(String),
    #[error("cancelled")]
    Cancelled,
}

impl From<std::io::Error> for ExecError {
    fn from(e: std::io::Error) -> Self {
        ExecError::Spawn(e.to_string())
    }
}

pub type ExecResult<T> = Result<T, ExecError>;
