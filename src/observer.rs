//! Hooks the download engine reports through.
//!
//! The engine never logs outcomes itself. It hands every event to a
//! [`DownloadObserver`], so callers decide whether results go to the log,
//! a UI, or a test collector.
use crate::report::{DownloadOutcome, OutcomeStatus};
use crate::task::{DownloadTask, SkippedAsset};
use tracing::{debug, info, warn};

pub trait DownloadObserver: Send + Sync {
    /// Called when a task acquires its slot and starts transferring.
    fn task_started(&self, _task: &DownloadTask) {}

    /// Called exactly once per dispatched task.
    fn task_finished(&self, outcome: &DownloadOutcome);

    /// Called for manifest entries that never became tasks.
    fn task_skipped(&self, _skipped: &SkippedAsset) {}
}

/// Writes events to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DownloadObserver for TracingObserver {
    fn task_started(&self, task: &DownloadTask) {
        debug!(id = %task.id, url = %task.url, "Downloading asset");
    }

    fn task_finished(&self, outcome: &DownloadOutcome) {
        match &outcome.status {
            OutcomeStatus::Succeeded { bytes } => info!(
                id = %outcome.id,
                path = %outcome.destination.display(),
                bytes,
                "Asset downloaded successfully"
            ),
            OutcomeStatus::Failed { kind, message } => warn!(
                id = %outcome.id,
                %kind,
                "Asset download failed: {message}"
            ),
        }
    }

    fn task_skipped(&self, skipped: &SkippedAsset) {
        warn!(id = %skipped.id, "Skipping asset: {}", skipped.reason);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DownloadObserver for NoopObserver {
    fn task_finished(&self, _outcome: &DownloadOutcome) {}
}
