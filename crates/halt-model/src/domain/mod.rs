mod token;
pub use token::{CorrelationToken, TokenError};

mod job_id;
pub use job_id::JobId;

mod job_params;
pub use job_params::JobParams;

mod job;
pub use job::Job;

mod outcome;
pub use outcome::CancelOutcome;

mod reply;
pub use reply::{MSG_INVALID_INPUT, StopReply, StopRequest};

/// Name of a node hosting execution slots.
pub type NodeName = String;

/// Position of a slot inside its node (0-based, node-assigned).
pub type SlotIndex = usize;
