use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    routing::post,
};
use halt_model::StopRequest;

use crate::{error::ApiError, handler::ApiHandler};

/// Header carrying the caller's request handle; echoed back in the reply.
pub const HANDLE_HEADER: &str = "x-job-handle";

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /api/v1/jobs/stop - Cancel the job whose token is the raw request body
    /// - POST /api/v1/jobs/{token}/stop - Cancel the job whose token is in the path
    ///
    /// Both answer `200` with the reply JSON; a failed cancellation is reported in the body.
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/v1/jobs/stop", post(stop_job::<H>))
            .route("/api/v1/jobs/{token}/stop", post(stop_job_by_path::<H>))
            .with_state(self.handler)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/jobs/stop
async fn stop_job<H>(
    State(handler): State<Arc<H>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let handle = request_handle(&headers)?;
    // An empty body is an absent payload.
    let payload = (!body.is_empty()).then(|| body.to_vec());

    let reply = handler.stop_job(StopRequest::new(handle, payload)).await?;
    Ok(Json(reply))
}

/// POST /api/v1/jobs/{token}/stop
async fn stop_job_by_path<H>(
    State(handler): State<Arc<H>>,
    headers: HeaderMap,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let handle = request_handle(&headers)?;
    let reply = handler
        .stop_job(StopRequest::new(handle, Some(token.into_bytes())))
        .await?;
    Ok(Json(reply))
}

fn request_handle(headers: &HeaderMap) -> Result<String, ApiError> {
    match headers.get(HANDLE_HEADER) {
        None => Ok(String::new()),
        Some(value) => value
            .to_str()
            .map(str::to_string)
            .map_err(|_| ApiError::InvalidRequest(format!("{HANDLE_HEADER} is not valid text"))),
    }
}
