//! Scripted slots for exercising scan races without a runtime.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use halt_model::{CorrelationToken, Job, SlotIndex};

use crate::slot::{ExecutionSlot, SlotRef};

pub(crate) fn job(seq: u64, token: &str) -> Job {
    Job::new(seq, format!("build#{seq}"), "master").with_token(token.parse().unwrap())
}

pub(crate) fn token(s: &str) -> CorrelationToken {
    s.parse().unwrap()
}

pub(crate) struct FakeSlot {
    index: SlotIndex,
    /// What `is_idle` reports; decoupled from `job` to model mid-scan transitions.
    idle: AtomicBool,
    job: Mutex<Option<Job>>,
    interrupted: AtomicBool,
    /// Clear the job as soon as it is interrupted.
    finish_on_interrupt: bool,
    interrupts: AtomicUsize,
    reads: AtomicUsize,
}

impl FakeSlot {
    fn build(index: SlotIndex, idle: bool, job: Option<Job>) -> Arc<Self> {
        Self::build_with(index, idle, job, false)
    }

    fn build_with(
        index: SlotIndex,
        idle: bool,
        job: Option<Job>,
        finish_on_interrupt: bool,
    ) -> Arc<Self> {
        Arc::new(Self {
            index,
            idle: AtomicBool::new(idle),
            job: Mutex::new(job),
            interrupted: AtomicBool::new(false),
            finish_on_interrupt,
            interrupts: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        })
    }

    pub fn idle(index: SlotIndex) -> Arc<Self> {
        Self::build(index, true, None)
    }

    /// Idle slot that still remembers the last job it ran.
    pub fn idle_with_stale(index: SlotIndex, job: Job) -> Arc<Self> {
        Self::build(index, true, Some(job))
    }

    pub fn busy(index: SlotIndex, job: Job) -> Arc<Self> {
        Self::build(index, false, Some(job))
    }

    /// Reports busy, but the job is gone by the time it is read.
    pub fn vanishing(index: SlotIndex) -> Arc<Self> {
        Self::build(index, false, None)
    }

    pub fn interrupted(index: SlotIndex, job: Job) -> Arc<Self> {
        let slot = Self::build(index, false, Some(job));
        slot.interrupted.store(true, Ordering::SeqCst);
        slot
    }

    /// Busy slot whose job stops right after the first interrupt.
    pub fn busy_finishing(index: SlotIndex, job: Job) -> Arc<Self> {
        Self::build_with(index, false, Some(job), true)
    }

    pub fn slot(self: &Arc<Self>) -> SlotRef {
        self.clone()
    }

    pub fn interrupt_count(&self) -> usize {
        self.interrupts.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn finish(&self) {
        *self.job.lock().unwrap() = None;
        self.idle.store(true, Ordering::SeqCst);
    }
}

impl ExecutionSlot for FakeSlot {
    fn index(&self) -> SlotIndex {
        self.index
    }

    fn is_idle(&self) -> bool {
        self.idle.load(Ordering::SeqCst)
    }

    fn current_job(&self) -> Option<Job> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.job.lock().unwrap().clone()
    }

    fn interrupt(&self) -> bool {
        self.interrupts.fetch_add(1, Ordering::SeqCst);
        if self.job.lock().unwrap().is_none() {
            return false;
        }
        let issued = !self.interrupted.swap(true, Ordering::SeqCst);
        if issued && self.finish_on_interrupt {
            self.finish();
        }
        issued
    }
}
