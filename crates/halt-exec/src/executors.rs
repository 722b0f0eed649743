use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};

use halt_core::{ExecutionSlot, Node, SlotRef, local_node_name};
use halt_model::{CorrelationToken, Job, JobId, JobParams, NodeKind, NodeName, SlotIndex};
use tokio::{runtime::Handle, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::{
    error::{ExecError, ExecResult},
    slot::ExecSlot,
};

/// What to run: identity and tagging of a job about to be dispatched.
#[derive(Debug, Clone)]
pub struct Submission {
    id: Option<JobId>,
    token: Option<CorrelationToken>,
    params: JobParams,
}

impl Submission {
    /// New submission tagged with a fresh random correlation token.
    pub fn new() -> Self {
        let token = CorrelationToken::try_from(uuid::Uuid::new_v4().to_string()).ok();
        Self {
            id: None,
            token,
            params: JobParams::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<JobId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_token(mut self, token: CorrelationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Dispatch the job without a correlation token; it cannot be cancelled by token.
    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn with_params(mut self, params: JobParams) -> Self {
        self.params = params;
        self
    }

    pub fn token(&self) -> Option<&CorrelationToken> {
        self.token.as_ref()
    }
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

/// A job that has been placed on a slot.
#[derive(Debug)]
pub struct Dispatched {
    pub job: Job,
    pub slot: SlotIndex,
    pub handle: JoinHandle<ExecResult<()>>,
}

/// The execution slots of one node.
///
/// Assigns sequence numbers and places jobs on the first idle slot.
/// A number is consumed only by a job that got a slot, so sequence numbers have no gaps.
pub struct Executors {
    node: NodeName,
    kind: NodeKind,
    slots: Vec<Arc<ExecSlot>>,
    /// Last assigned sequence number; held for the whole placement.
    seq: Mutex<u64>,
}

impl Executors {
    pub fn new(node: impl Into<NodeName>, kind: NodeKind, count: usize) -> Self {
        Self {
            node: node.into(),
            kind,
            slots: (0..count).map(ExecSlot::new).collect(),
            seq: Mutex::new(0),
        }
    }

    /// Slots of the node hosting this process, named after the host.
    pub fn local(count: usize) -> Self {
        Self::new(local_node_name(), NodeKind::Local, count)
    }

    pub fn remote(node: impl Into<NodeName>, count: usize) -> Self {
        Self::new(node, NodeKind::Remote, count)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.node
    }

    #[inline]
    pub fn slots(&self) -> &[Arc<ExecSlot>] {
        &self.slots
    }

    /// Node view over these slots, for registration in a node registry.
    pub fn node(&self) -> Node {
        let slots: Vec<SlotRef> = self
            .slots
            .iter()
            .map(|s| Arc::clone(s) as SlotRef)
            .collect();
        Node::new(self.node.clone(), self.kind, slots)
    }

    /// Number of slots currently running a job.
    pub fn busy(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_idle()).count()
    }

    /// Place a job on the first idle slot and run `work` there.
    #[instrument(level = "debug", skip(self, submission, work), fields(node = %self.node))]
    pub fn dispatch<F, Fut>(&self, submission: Submission, work: F) -> ExecResult<Dispatched>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| ExecError::NoRuntime)?;

        let mut last = self.seq.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = *last + 1;
        let id = submission
            .id
            .unwrap_or_else(|| JobId::from(format!("{}#{seq}", self.node)));
        let mut job = Job::new(seq, id, self.node.clone()).with_params(submission.params);
        job.token = submission.token;

        for slot in &self.slots {
            let (generation, cancel) = match slot.occupy(job.clone()) {
                Ok(run) => run,
                Err(ExecError::SlotBusy { .. }) => continue,
                Err(e) => return Err(e),
            };
            *last = seq;
            drop(last);

            debug!(
                seq,
                job = %job.id,
                slot = slot.index(),
                token = job.token.as_ref().map(|t| t.as_str()).unwrap_or("-"),
                "job dispatched"
            );
            let join = slot.spawn_run(&handle, generation, cancel, work);
            return Ok(Dispatched {
                job,
                slot: slot.index(),
                handle: join,
            });
        }

        Err(ExecError::NoIdleSlot {
            node: self.node.clone(),
        })
    }
}
