//! # wallfetch
//!
//! `wallfetch` resolves a remote JSON manifest of wallpapers and downloads
//! every asset concurrently into a local directory.
//! - Bounded concurrency with an all-complete barrier
//! - Per-asset failures isolated and reported, never fatal
//! - Per-request timeouts and cooperative cancellation
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use wallfetch::{Downloader, DownloaderConfig, ManifestResolver, utils};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = utils::build_client(&utils::ClientOptions::default())?;
//! let resolver = ManifestResolver::new(client.clone(), wallfetch::DEFAULT_MANIFEST_URL);
//! let downloader = Downloader::new(client, DownloaderConfig::default());
//!
//! let report = wallfetch::run(&resolver, &downloader, Path::new("downloads")).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod config;
pub mod downloader;
pub mod error;
pub mod manifest;
pub mod observer;
pub mod report;
pub mod task;
pub mod utils;
pub mod worker;

pub use args::Args;
pub use config::Settings;
pub use downloader::{Downloader, DownloaderConfig, run};
pub use error::{FetchError, FilesystemError, RunError, SkipReason, TransferError, UrlParseError};
pub use manifest::{AssetManifest, DEFAULT_MANIFEST_URL, ManifestResolver};
pub use report::{DownloadOutcome, DownloadReport, FailureKind, OutcomeStatus};
pub use task::DownloadTask;
pub use worker::download_asset;
