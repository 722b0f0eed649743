use crate::{CorrelationToken, Job};

/// Result of one cancellation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The request carried no usable token; the pool was not scanned.
    InvalidInput,
    /// A busy slot ran a job with this token and an interrupt was newly issued.
    Canceled { token: CorrelationToken, job: Job },
    /// A job with this token was found, but its slot was already interrupted or had gone idle.
    RaceLost { token: CorrelationToken, job: Job },
    /// No busy slot ran a job with this token.
    NotFound { token: CorrelationToken },
}

impl CancelOutcome {
    /// Returns `true` only when an interrupt was issued by this attempt.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, CancelOutcome::Canceled { .. })
    }

    /// Token the attempt was made for, if the request carried one.
    pub fn token(&self) -> Option<&CorrelationToken> {
        match self {
            CancelOutcome::InvalidInput => None,
            CancelOutcome::Canceled { token, .. }
            | CancelOutcome::RaceLost { token, .. }
            | CancelOutcome::NotFound { token } => Some(token),
        }
    }

    /// Matched job, if any.
    pub fn job(&self) -> Option<&Job> {
        match self {
            CancelOutcome::Canceled { job, .. } | CancelOutcome::RaceLost { job, .. } => Some(job),
            CancelOutcome::InvalidInput | CancelOutcome::NotFound { .. } => None,
        }
    }

    /// Short symbolic name, recorded on the `stop` span.
    pub fn kind(&self) -> &'static str {
        match self {
            CancelOutcome::InvalidInput => "invalid_input",
            CancelOutcome::Canceled { .. } => "canceled",
            CancelOutcome::RaceLost { .. } => "race_lost",
            CancelOutcome::NotFound { .. } => "not_found",
        }
    }
}
