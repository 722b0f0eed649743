//! Locate a running job by correlation token and interrupt it.

use halt_model::{CancelOutcome, CorrelationToken, StopReply, StopRequest};
use tracing::{Span, debug, field, info, instrument, trace, warn};

use crate::pool::SlotPool;

/// Canceller tuning.
#[derive(Debug, Clone, Default)]
pub struct CancelConfig {
    /// Maximum number of slots inspected per request; `None` scans the whole pool.
    pub scan_limit: Option<usize>,
}

/// Finds the job carrying a correlation token and interrupts it at most once.
///
/// The scan takes no pool-wide lock: each slot is read on its own, so the scan sees a
/// per-slot consistent but pool-wide eventually consistent view.
#[derive(Clone)]
pub struct JobCanceller {
    pool: SlotPool,
    cfg: CancelConfig,
}

impl JobCanceller {
    pub fn new(pool: SlotPool) -> Self {
        Self {
            pool,
            cfg: CancelConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: CancelConfig) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    /// Handle one cancellation request end to end: decode, scan, build the reply.
    #[instrument(level = "debug", skip(self, req), fields(handle = %req.handle, outcome = field::Empty))]
    pub fn stop(&self, req: &StopRequest) -> StopReply {
        let outcome = self.cancel_payload(req.payload.as_deref());
        Span::current().record("outcome", outcome.kind());
        StopReply::from_outcome(req.handle.clone(), &outcome)
    }

    /// Decode a raw payload and cancel the job it names.
    pub fn cancel_payload(&self, payload: Option<&[u8]>) -> CancelOutcome {
        match CorrelationToken::decode(payload) {
            Ok(token) => self.locate_and_cancel(&token),
            Err(e) => {
                info!(reason = %e, "client passed an invalid job id");
                CancelOutcome::InvalidInput
            }
        }
    }

    /// Scan the pool in order and interrupt the first busy slot whose job carries `token`.
    ///
    /// The scan stops at the first match; uniqueness of the token is not verified.
    #[instrument(level = "debug", skip(self, token), fields(token = %token))]
    pub fn locate_and_cancel(&self, token: &CorrelationToken) -> CancelOutcome {
        let limit = self.cfg.scan_limit.unwrap_or(usize::MAX);
        let mut scanned = 0usize;

        for (node, slot) in self.pool.all_slots() {
            if scanned == limit {
                warn!(limit, "scan limit reached before a matching job was found");
                return CancelOutcome::NotFound {
                    token: token.clone(),
                };
            }
            scanned += 1;

            if slot.is_idle() {
                continue;
            }
            // Busy a moment ago; may have finished since.
            let Some(job) = slot.current_job() else {
                trace!(node = node.name(), slot = slot.index(), "slot went idle during scan");
                continue;
            };
            if !job.is_tagged(token) {
                continue;
            }

            if slot.interrupt() {
                info!(
                    seq = job.seq,
                    job = %job.id,
                    node = %job.node,
                    slot = slot.index(),
                    node_kind = %node.kind(),
                    params = %job.params,
                    "aborting job"
                );
                return CancelOutcome::Canceled {
                    token: token.clone(),
                    job,
                };
            }

            warn!(
                seq = job.seq,
                job = %job.id,
                node = %job.node,
                slot = slot.index(),
                "job already interrupted or finished"
            );
            return CancelOutcome::RaceLost {
                token: token.clone(),
                job,
            };
        }

        debug!(scanned, "no running job carries this token");
        CancelOutcome::NotFound {
            token: token.clone(),
        }
    }
}
