use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use halt_core::ExecutionSlot;
use halt_model::{Job, SlotIndex};
use tokio::{runtime::Handle, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::{ExecError, ExecResult};

/// Execution slot backed by a tokio task.
///
/// All state sits behind one mutex, so every [`ExecutionSlot`] accessor observes a single consistent state.
/// The lock is never held across an await point.
pub struct ExecSlot {
    index: SlotIndex,
    inner: Mutex<Inner>,
}

struct Inner {
    state: SlotState,
    next_generation: u64,
}

enum SlotState {
    Idle,
    Busy(Run),
}

struct Run {
    /// Distinguishes consecutive jobs on the same slot.
    generation: u64,
    job: Job,
    cancel: CancellationToken,
}

/// Returns the slot to idle when the job's task ends, including on panic or abort.
struct Release {
    slot: Arc<ExecSlot>,
    generation: u64,
}

impl Drop for Release {
    fn drop(&mut self) {
        self.slot.release(self.generation);
    }
}

impl ExecSlot {
    pub fn new(index: SlotIndex) -> Arc<Self> {
        Arc::new(Self {
            index,
            inner: Mutex::new(Inner {
                state: SlotState::Idle,
                next_generation: 0,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Occupy the slot with `job` and run `work` on a tokio task.
    ///
    /// `work` receives a cancellation token that fires when the slot is interrupted.
    /// The task resolves to [`ExecError::Cancelled`] if the interrupt wins, otherwise to the job result.
    pub fn dispatch<F, Fut>(
        self: &Arc<Self>,
        job: Job,
        work: F,
    ) -> ExecResult<JoinHandle<ExecResult<()>>>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| ExecError::NoRuntime)?;
        let (generation, cancel) = self.occupy(job)?;
        Ok(self.spawn_run(&handle, generation, cancel, work))
    }

    /// Move the slot from idle to busy. Fails if a job already occupies it.
    pub(crate) fn occupy(&self, job: Job) -> ExecResult<(u64, CancellationToken)> {
        let mut inner = self.lock();
        if let SlotState::Busy(_) = inner.state {
            return Err(ExecError::SlotBusy { slot: self.index });
        }

        inner.next_generation += 1;
        let generation = inner.next_generation;
        let cancel = CancellationToken::new();

        trace!(slot = self.index, seq = job.seq, job = %job.id, "slot occupied");
        inner.state = SlotState::Busy(Run {
            generation,
            job,
            cancel: cancel.clone(),
        });
        Ok((generation, cancel))
    }

    pub(crate) fn spawn_run<F, Fut>(
        self: &Arc<Self>,
        handle: &Handle,
        generation: u64,
        cancel: CancellationToken,
        work: F,
    ) -> JoinHandle<ExecResult<()>>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        let release = Release {
            slot: Arc::clone(self),
            generation,
        };
        let fut = work(cancel.clone());

        handle.spawn(async move {
            let guard = release;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(slot = guard.slot.index, "job interrupted");
                    Err(ExecError::Cancelled)
                }
                res = fut => res.map_err(ExecError::Failed),
            }
        })
    }

    /// Return to idle, unless a newer job has taken the slot since.
    fn release(&self, generation: u64) {
        let mut inner = self.lock();
        let seq = match &inner.state {
            SlotState::Busy(run) if run.generation == generation => run.job.seq,
            _ => {
                trace!(slot = self.index, generation, "stale release ignored");
                return;
            }
        };
        inner.state = SlotState::Idle;
        trace!(slot = self.index, seq, "slot released");
    }
}

impl ExecutionSlot for ExecSlot {
    #[inline]
    fn index(&self) -> SlotIndex {
        self.index
    }

    fn is_idle(&self) -> bool {
        matches!(self.lock().state, SlotState::Idle)
    }

    fn current_job(&self) -> Option<Job> {
        match &self.lock().state {
            SlotState::Busy(run) => Some(run.job.clone()),
            SlotState::Idle => None,
        }
    }

    fn interrupt(&self) -> bool {
        let inner = self.lock();
        match &inner.state {
            SlotState::Busy(run) if !run.cancel.is_cancelled() => {
                run.cancel.cancel();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(seq: u64) -> Job {
        Job::new(seq, format!("build#{seq}"), "master").with_token(format!("t{seq}").parse().unwrap())
    }

    async fn forever(ctx: CancellationToken) -> Result<(), String> {
        ctx.cancelled().await;
        Ok(())
    }

    #[tokio::test]
    async fn dispatch_occupies_slot() {
        let slot = ExecSlot::new(0);
        assert!(slot.is_idle());

        let handle = slot.dispatch(job(1), forever).unwrap();
        assert!(!slot.is_idle());
        assert_eq!(slot.current_job().map(|j| j.seq), Some(1));

        assert!(slot.interrupt());
        assert_eq!(handle.await.unwrap(), Err(ExecError::Cancelled));
        assert!(slot.is_idle());
        assert!(slot.current_job().is_none());
    }

    #[tokio::test]
    async fn interrupt_is_issued_once() {
        let slot = ExecSlot::new(0);
        let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();
        let (_hold_tx, hold_rx) = tokio::sync::oneshot::channel::<()>();

        // Ignores the token so the slot stays busy after the interrupt.
        let handle = slot
            .dispatch(job(1), move |_ctx| async move {
                let _ = started_tx.send(());
                let _ = hold_rx.await;
                Ok(())
            })
            .unwrap();
        started_rx.await.unwrap();

        assert!(slot.interrupt());
        assert!(!slot.interrupt());
        assert!(slot.current_job().is_some());

        assert_eq!(handle.await.unwrap(), Err(ExecError::Cancelled));
        assert!(!slot.interrupt());
    }

    #[tokio::test]
    async fn idle_slot_interrupt_is_noop() {
        let slot = ExecSlot::new(3);
        assert!(!slot.interrupt());
        assert_eq!(slot.index(), 3);
    }

    #[tokio::test]
    async fn busy_slot_rejects_dispatch() {
        let slot = ExecSlot::new(2);
        let handle = slot.dispatch(job(1), forever).unwrap();

        let err = slot.dispatch(job(2), forever).unwrap_err();
        assert_eq!(err, ExecError::SlotBusy { slot: 2 });
        assert_eq!(slot.current_job().map(|j| j.seq), Some(1));

        slot.interrupt();
        let _ = handle.await;
    }

    #[tokio::test]
    async fn completion_frees_slot() {
        let slot = ExecSlot::new(0);
        let handle = slot.dispatch(job(1), |_ctx| async { Ok(()) }).unwrap();

        assert_eq!(handle.await.unwrap(), Ok(()));
        assert!(slot.is_idle());
        assert!(!slot.interrupt());
    }

    #[tokio::test]
    async fn failure_is_reported_and_frees_slot() {
        let slot = ExecSlot::new(0);
        let handle = slot
            .dispatch(job(1), |_ctx| async { Err("exit code: 2".to_string()) })
            .unwrap();

        assert_eq!(
            handle.await.unwrap(),
            Err(ExecError::Failed("exit code: 2".into()))
        );
        assert!(slot.is_idle());
    }

    #[tokio::test]
    async fn stale_release_keeps_newer_job() {
        let slot = ExecSlot::new(0);
        let (first_gen, _) = slot.occupy(job(1)).unwrap();
        slot.release(first_gen);

        let (second_gen, _) = slot.occupy(job(2)).unwrap();
        assert_ne!(first_gen, second_gen);

        slot.release(first_gen);
        assert_eq!(slot.current_job().map(|j| j.seq), Some(2));

        slot.release(second_gen);
        assert!(slot.is_idle());
    }

    #[test]
    fn dispatch_outside_runtime_fails() {
        let slot = ExecSlot::new(0);
        let err = slot.dispatch(job(1), forever).unwrap_err();
        assert_eq!(err, ExecError::NoRuntime);
        assert!(slot.is_idle());
    }
}
