//! Error types for manifest resolution and asset transfers.
//!
//! Errors fall into two groups. [`FetchError`] and a destination-directory
//! [`FilesystemError`] stop the whole run (see [`RunError`]). Everything else
//! is local to one asset and ends up in the
//! [`DownloadReport`](crate::report::DownloadReport) instead of being returned.
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve or decode the remote manifest.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("manifest request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("manifest request returned status {0}")]
    Status(StatusCode),

    #[error("failed to parse manifest body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload decoded but has no top-level `data` object.
    #[error("manifest has no top-level `data` object")]
    MissingData,
}

/// A manifest entry whose source URL could not be parsed.
#[derive(Debug, Clone, Error)]
#[error("invalid source url `{url}`: {source}")]
pub struct UrlParseError {
    pub url: String,
    #[source]
    pub source: url::ParseError,
}

/// Why a manifest entry never became a download task.
#[derive(Debug, Clone, Error)]
pub enum SkipReason {
    #[error(transparent)]
    InvalidUrl(#[from] UrlParseError),

    /// Sanitizing the id emptied the name or cut off its extension.
    #[error("no usable file name for this id (sanitized to `{file_name}`)")]
    UnusableName { file_name: String },

    #[error("file name `{file_name}` is already used by asset `{taken_by}`")]
    NameCollision { file_name: String, taken_by: String },
}

/// Network-side failure of a single asset download.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(StatusCode),

    #[error("download cancelled")]
    Cancelled,
}

/// Local disk failure, either for the destination directory or one file.
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a run before or instead of downloading.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}
