use crate::error::{FilesystemError, TransferError};
use crate::report::{DownloadOutcome, FailureKind};
use crate::task::DownloadTask;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Error)]
enum AssetError {
    #[error("cannot build request: {0}")]
    Resolve(reqwest::Error),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

impl AssetError {
    fn kind(&self) -> FailureKind {
        match self {
            AssetError::Resolve(_) => FailureKind::Resolve,
            AssetError::Transfer(_) => FailureKind::Transfer,
            AssetError::Filesystem(_) => FailureKind::Filesystem,
        }
    }
}

/// Downloads a single asset into its destination file.
///
/// Never returns an error: every failure is folded into the returned
/// [`DownloadOutcome`] so one bad asset cannot affect the rest of the batch.
/// Nothing is written unless the server answers `200 OK`, and a file left
/// half-written by a failed or cancelled transfer is removed.
pub async fn download_asset(
    task: &DownloadTask,
    client: &Client,
    cancel: &CancellationToken,
) -> DownloadOutcome {
    let mut created = false;

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AssetError::Transfer(TransferError::Cancelled)),
        result = transfer(task, client, &mut created) => result,
    };

    match result {
        Ok(bytes) => DownloadOutcome::succeeded(&task.id, &task.destination, bytes),
        Err(e) => {
            if created && let Err(remove_err) = fs::remove_file(&task.destination).await {
                debug!(
                    path = %task.destination.display(),
                    "Could not remove partial file: {remove_err}"
                );
            }
            DownloadOutcome::failed(&task.id, &task.destination, e.kind(), e)
        }
    }
}

async fn transfer(
    task: &DownloadTask,
    client: &Client,
    created: &mut bool,
) -> Result<u64, AssetError> {
    let mut response = client.get(&task.url).send().await.map_err(|e| {
        if e.is_builder() {
            AssetError::Resolve(e)
        } else {
            AssetError::Transfer(e.into())
        }
    })?;

    if response.status() != StatusCode::OK {
        return Err(TransferError::Status(response.status()).into());
    }

    let file = fs::File::create(&task.destination)
        .await
        .map_err(|source| FilesystemError::CreateFile {
            path: task.destination.clone(),
            source,
        })?;
    *created = true;

    let mut writer = BufWriter::new(file);
    let mut written = 0u64;

    while let Some(bytes) = response.chunk().await.map_err(TransferError::from)? {
        writer
            .write_all(&bytes)
            .await
            .map_err(|source| FilesystemError::Write {
                path: task.destination.clone(),
                source,
            })?;
        written += bytes.len() as u64;
    }

    // Ensure all bytes are flushed to disk before reporting success
    writer.flush().await.map_err(|source| FilesystemError::Write {
        path: task.destination.clone(),
        source,
    })?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn task(id: &str, url: &str, dir: &Path) -> DownloadTask {
        DownloadTask {
            id: id.to_string(),
            url: url.to_string(),
            destination: dir.join(format!("{id}.jpg")),
        }
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_resolve_failure() {
        let dir = tempdir().unwrap();
        let task = task("ftp", "ftp://example.com/image.jpg", dir.path());

        let outcome = download_asset(&task, &Client::new(), &CancellationToken::new()).await;

        assert_eq!(outcome.failure_kind(), Some(FailureKind::Resolve));
        assert!(!task.destination.exists());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let dir = tempdir().unwrap();
        let task = task("a", "http://127.0.0.1:9/a.jpg", dir.path());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = download_asset(&task, &Client::new(), &cancel).await;

        assert_eq!(outcome.failure_kind(), Some(FailureKind::Transfer));
        assert!(!task.destination.exists());
    }
}
