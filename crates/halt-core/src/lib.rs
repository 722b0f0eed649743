pub mod error;
pub use error::CoreError;

pub mod slot;
pub use slot::{ExecutionSlot, SlotRef};

pub mod node;
pub use node::Node;

pub mod registry;
pub use registry::{NodeRegistry, StaticRegistry};

pub mod pool;
pub use pool::SlotPool;

pub mod cancel;
pub use cancel::{CancelConfig, JobCanceller};

mod system;
pub use system::local_node_name;

#[cfg(test)]
pub(crate) mod testing;
