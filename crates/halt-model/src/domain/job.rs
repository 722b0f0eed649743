use serde::{Deserialize, Serialize};

use crate::{CorrelationToken, JobId, JobParams, NodeName};

/// A unit of work occupying one execution slot.
///
/// Only `token` takes part in cancellation matching.
/// The remaining fields identify the job in audit logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Numeric sequence identifier (build number).
    pub seq: u64,
    /// String identifier.
    pub id: JobId,
    /// Correlation token attached at submission time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<CorrelationToken>,
    /// Node the job is running on.
    pub node: NodeName,
    /// Parameters the job was started with.
    #[serde(default, skip_serializing_if = "JobParams::is_empty")]
    pub params: JobParams,
}

impl Job {
    pub fn new(seq: u64, id: impl Into<JobId>, node: impl Into<NodeName>) -> Self {
        Self {
            seq,
            id: id.into(),
            token: None,
            node: node.into(),
            params: JobParams::new(),
        }
    }

    pub fn with_token(mut self, token: CorrelationToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_params(mut self, params: JobParams) -> Self {
        self.params = params;
        self
    }

    /// Returns `true` if the job carries exactly this token.
    #[inline]
    pub fn is_tagged(&self, token: &CorrelationToken) -> bool {
        self.token.as_ref() == Some(token)
    }
}
