use serde::{Deserialize, Serialize};

use crate::CancelOutcome;

/// Failure message returned when the request carries no usable job id.
pub const MSG_INVALID_INPUT: &str = "I need the job Id please";

/// A cancellation request as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopRequest {
    /// Transport handle of the request; echoed back in the reply.
    pub handle: String,
    /// Raw payload: UTF-8 text of the correlation token.
    pub payload: Option<Vec<u8>>,
}

impl StopRequest {
    pub fn new(handle: impl Into<String>, payload: Option<Vec<u8>>) -> Self {
        Self {
            handle: handle.into(),
            payload,
        }
    }
}

/// Reply sent back to the caller of a cancellation request.
///
/// `numerator` and `denominator` are reserved by the transport protocol and always zero.
/// `warning_message` is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopReply {
    pub handle: String,
    pub success: bool,
    pub result_message: String,
    pub warning_message: String,
    pub failure_message: String,
    pub numerator: u32,
    pub denominator: u32,
}

impl StopReply {
    /// Build the reply for a finished cancellation attempt.
    pub fn from_outcome(handle: impl Into<String>, outcome: &CancelOutcome) -> Self {
        let mut reply = StopReply {
            handle: handle.into(),
            ..Default::default()
        };

        match outcome {
            CancelOutcome::InvalidInput => {
                reply.failure_message = MSG_INVALID_INPUT.to_string();
            }
            CancelOutcome::Canceled { token, .. } => {
                reply.success = true;
                reply.result_message = format!("Canceled build {token}");
            }
            // Not distinguished on the wire; callers only learn the token is no longer cancelable.
            CancelOutcome::RaceLost { token, .. } | CancelOutcome::NotFound { token } => {
                reply.failure_message = format!("Could not cancel build {token}");
            }
        }
        reply
    }
}
