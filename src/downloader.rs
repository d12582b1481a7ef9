//! Concurrent batch download engine.
use crate::error::{FilesystemError, RunError};
use crate::manifest::{AssetManifest, ManifestResolver};
use crate::observer::{DownloadObserver, TracingObserver};
use crate::report::{DownloadOutcome, DownloadReport, FailureKind};
use crate::task::{self, DownloadTask};
use crate::worker::download_asset;
use futures_util::future::join_all;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Default cap on simultaneous transfers.
pub const DEFAULT_MAX_CONCURRENT: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct DownloaderConfig {
    /// Maximum number of assets transferring at once. Zero is treated as one.
    pub max_concurrent: usize,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// Downloads every asset of a manifest into a directory.
#[derive(Clone)]
pub struct Downloader {
    client: Client,
    config: DownloaderConfig,
    observer: Arc<dyn DownloadObserver>,
    cancel: CancellationToken,
}

impl Downloader {
    pub fn new(client: Client, config: DownloaderConfig) -> Self {
        Self {
            client,
            config,
            observer: Arc::new(TracingObserver),
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the default [`TracingObserver`].
    pub fn with_observer(mut self, observer: Arc<dyn DownloadObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Uses an externally owned token, e.g. one cancelled on Ctrl+C.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Downloads every manifest entry into `dest_dir`.
    ///
    /// The directory is created first, parents included. Every task is then
    /// spawned at once, with a semaphore limiting how many transfer at the
    /// same time. The call returns only after every spawned task has
    /// finished, and the report holds exactly one outcome per task.
    ///
    /// # Errors
    ///
    /// Only failing to create `dest_dir` is an error. Per-asset failures are
    /// recorded in the report.
    pub async fn download_all(
        &self,
        manifest: &AssetManifest,
        dest_dir: &Path,
    ) -> Result<DownloadReport, FilesystemError> {
        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|source| FilesystemError::CreateDir {
                path: dest_dir.to_path_buf(),
                source,
            })?;

        let plan = task::plan_tasks(manifest, dest_dir);
        for skipped in &plan.skipped {
            self.observer.task_skipped(skipped);
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));
        let mut tasks = Vec::with_capacity(plan.tasks.len());
        let mut dispatched = Vec::with_capacity(plan.tasks.len());

        for download in plan.tasks {
            let sem_ref = semaphore.clone();
            let client_ref = self.client.clone();
            let observer_ref = self.observer.clone();
            let token_ref = self.cancel.clone();
            dispatched.push((download.id.clone(), download.destination.clone()));

            let task = tokio::spawn(async move {
                run_task(download, sem_ref, client_ref, observer_ref, token_ref).await
            });
            tasks.push(task);
        }

        let results = join_all(tasks).await;

        let outcomes = results
            .into_iter()
            .zip(dispatched)
            .map(|(result, (id, destination))| match result {
                Ok(outcome) => outcome,
                Err(join_err) => {
                    // A panicked task still gets its terminal outcome
                    error!(id = %id, "Download task aborted: {join_err}");
                    let outcome =
                        DownloadOutcome::failed(id, destination, FailureKind::Transfer, join_err);
                    self.observer.task_finished(&outcome);
                    outcome
                }
            })
            .collect();

        Ok(DownloadReport {
            outcomes,
            skipped: plan.skipped,
        })
    }
}

async fn run_task(
    task: DownloadTask,
    semaphore: Arc<Semaphore>,
    client: Client,
    observer: Arc<dyn DownloadObserver>,
    cancel: CancellationToken,
) -> DownloadOutcome {
    // Never closed
    let _permit = semaphore.acquire_owned().await.ok();

    observer.task_started(&task);
    let outcome = download_asset(&task, &client, &cancel).await;
    observer.task_finished(&outcome);
    outcome
}

/// Resolves the manifest and downloads everything it lists.
///
/// Resolution happens first. If it fails, nothing touches the filesystem.
///
/// # Errors
///
/// Returns [`RunError::Fetch`] when the manifest cannot be retrieved and
/// [`RunError::Filesystem`] when `dest_dir` cannot be created.
pub async fn run(
    resolver: &ManifestResolver,
    downloader: &Downloader,
    dest_dir: &Path,
) -> Result<DownloadReport, RunError> {
    let manifest = resolver.resolve().await?;
    info!(
        "Found {} images, started downloading into {}",
        manifest.len(),
        dest_dir.display()
    );

    let report = downloader.download_all(&manifest, dest_dir).await?;
    info!(%report, "Batch finished");
    Ok(report)
}
