//! Lifecycle scheduling: one deferred job for group formation at the start
//! time, one for reward payout at the end time.
//!
//! The port only promises delivery of a due job to the runner; at-most-once
//! execution is enforced by the service's dedup ledger because neither
//! formation nor payout is idempotent on its own.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::api::ArenaService;
use crate::models::TournamentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    FormGroups,
    PayRewards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LifecycleJob {
    pub tournament: TournamentId,
    pub kind: JobKind,
}

/// Port for deferring the two lifecycle side effects. No retry and no
/// cancellation once a job is enqueued.
pub trait SchedulerPort: Send + Sync {
    fn schedule(&self, job: LifecycleJob, at: DateTime<Utc>);
}

/// Tokio-backed scheduler: one sleeping task per job, due jobs emitted on an
/// unbounded channel drained by [`run_lifecycle_jobs`].
///
/// `schedule` must be called from within a tokio runtime context; without
/// one the job is dropped with an error log instead of panicking.
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<LifecycleJob>,
}

impl TokioScheduler {
    /// Returns the scheduler and the receiver the job runner drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<LifecycleJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SchedulerPort for TokioScheduler {
    fn schedule(&self, job: LifecycleJob, at: DateTime<Utc>) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                error!(?job, "no tokio runtime in scope, dropping lifecycle job");
                return;
            }
        };
        // Delay is fixed at scheduling time; a target already in the past
        // clamps to zero and fires immediately.
        let delay = (at - Utc::now()).to_std().unwrap_or_default();
        let tx = self.tx.clone();
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(job).is_err() {
                warn!(?job, "lifecycle runner stopped, dropping due job");
            }
        });
    }
}

/// Job runner loop: dispatches due jobs into the service until every
/// scheduler handle is dropped. Job failures have no caller to report to and
/// are logged only.
pub async fn run_lifecycle_jobs(
    service: Arc<ArenaService>,
    mut jobs: mpsc::UnboundedReceiver<LifecycleJob>,
) {
    while let Some(job) = jobs.recv().await {
        info!(tournament = %job.tournament, kind = ?job.kind, "lifecycle job due");
        if let Err(err) = service.run_lifecycle_job(job) {
            error!(tournament = %job.tournament, kind = ?job.kind, %err, "lifecycle job failed");
        }
    }
}
