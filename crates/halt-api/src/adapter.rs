use std::sync::Arc;

use async_trait::async_trait;
use halt_core::JobCanceller;
use halt_model::{StopReply, StopRequest};
use tracing::error;

use crate::error::ApiError;
use crate::handler::ApiHandler;

/// Adapter that bridges `JobCanceller` to `ApiHandler`.
///
/// The scan takes short per-slot locks, so it runs on the blocking pool rather than on an async worker.
pub struct CancellerAdapter {
    canceller: Arc<JobCanceller>,
}

impl CancellerAdapter {
    /// Create a new adapter wrapping the given canceller.
    pub fn new(canceller: Arc<JobCanceller>) -> Self {
        Self { canceller }
    }
}

#[async_trait]
impl ApiHandler for CancellerAdapter {
    async fn stop_job(&self, request: StopRequest) -> Result<StopReply, ApiError> {
        let canceller = Arc::clone(&self.canceller);
        tokio::task::spawn_blocking(move || canceller.stop(&request))
            .await
            .map_err(|e| {
                error!(error = %e, "cancellation task failed");
                ApiError::Internal(format!("cancellation task failed: {e}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halt_core::{SlotPool, StaticRegistry};
    use halt_exec::{ExecError, Executors, Submission};
    use halt_model::{MSG_INVALID_INPUT, NodeKind};

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stop_job_cancels_running_job() {
        let exec = Executors::new("master", NodeKind::Local, 2);
        let registry = StaticRegistry::new(exec.node()).unwrap();
        let adapter = CancellerAdapter::new(Arc::new(JobCanceller::new(SlotPool::new(Arc::new(
            registry,
        )))));

        let job = exec
            .dispatch(
                Submission::new().with_token("u1".parse().unwrap()),
                |ctx| async move {
                    ctx.cancelled().await;
                    Ok(())
                },
            )
            .unwrap();

        let reply = adapter
            .stop_job(StopRequest::new("H:1", Some(b"u1".to_vec())))
            .await
            .unwrap();
        assert!(reply.success);
        assert_eq!(reply.handle, "H:1");
        assert_eq!(job.handle.await.unwrap(), Err(ExecError::Cancelled));

        let reply = adapter
            .stop_job(StopRequest::new("H:2", Some(b"u1".to_vec())))
            .await
            .unwrap();
        assert!(!reply.success);
        assert_eq!(reply.failure_message, "Could not cancel build u1");
    }

    #[tokio::test]
    async fn stop_job_without_payload() {
        let registry = StaticRegistry::new(halt_core::Node::local("master", vec![])).unwrap();
        let adapter = CancellerAdapter::new(Arc::new(JobCanceller::new(SlotPool::new(Arc::new(
            registry,
        )))));

        let reply = adapter.stop_job(StopRequest::new("H", None)).await.unwrap();
        assert!(!reply.success);
        assert_eq!(reply.failure_message, MSG_INVALID_INPUT);
    }
}
