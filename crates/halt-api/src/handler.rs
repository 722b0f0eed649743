use async_trait::async_trait;
use halt_model::{StopReply, StopRequest};

use crate::error::ApiError;

/// Job cancellation API handler.
///
/// This trait abstracts the backend implementation, allowing users to:
/// - Use the provided `CancellerAdapter`
/// - Implement custom handlers with additional logic (auth, rate limiting, etc.)
///
/// Cancellation failures (bad token, no such job) are part of the reply, not an `Err`.
/// `Err` is reserved for faults of the handler itself.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Cancel the running job named by the request payload.
    async fn stop_job(&self, request: StopRequest) -> Result<StopReply, ApiError>;
}
