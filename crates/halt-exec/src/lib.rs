//! In-process execution subsystem: slots that run jobs on tokio tasks and honour interrupts.

mod error;
pub use error::{ExecError, ExecResult};

pub mod slot;
pub use slot::ExecSlot;

pub mod executors;
pub use executors::{Dispatched, Executors, Submission};

#[cfg(feature = "proc")]
pub mod proc;

pub mod prelude {
    pub use crate::error::{ExecError, ExecResult};
    pub use crate::{Dispatched, ExecSlot, Executors, Submission};
}
