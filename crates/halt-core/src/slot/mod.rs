//! Execution slot contract.
//!
//! A slot is one concurrent execution lane on a node. It is either idle or occupied by exactly one [`Job`].
//!
//! Slot state is owned by the execution subsystem; this crate only reads it and issues interrupts.
//! No pool-wide lock exists, so implementations must make every accessor individually atomic:
//! - `is_idle` and `current_job` each observe one consistent state, never a half-applied transition;
//! - `interrupt` checks and flips the interrupted flag in one step.
//!
//! Consecutive calls may still observe different states (a job can finish between `is_idle` and `current_job`).
//! Callers must treat that as "no job here now", not as an error.

use std::sync::Arc;

use halt_model::{Job, SlotIndex};

/// Shared handle to an execution slot.
pub type SlotRef = Arc<dyn ExecutionSlot>;

/// Accessor over one execution lane.
pub trait ExecutionSlot: Send + Sync + 'static {
    /// Node-assigned position of this slot (0-based).
    fn index(&self) -> SlotIndex;

    /// `true` if no job occupies the slot.
    fn is_idle(&self) -> bool;

    /// Snapshot of the job occupying the slot, or `None` if idle.
    fn current_job(&self) -> Option<Job>;

    /// Request cancellation of the occupying job.
    ///
    /// Returns `true` only if this call issued the interrupt.
    /// Returns `false` if the slot is idle or its job was already interrupted.
    /// Does not wait for the job to stop.
    fn interrupt(&self) -> bool;
}
