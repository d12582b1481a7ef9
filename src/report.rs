//! Per-asset outcomes and the aggregate batch report.
use crate::task::SkippedAsset;
use std::fmt;
use std::path::PathBuf;

/// Which stage an asset failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The URL could not be turned into a request.
    Resolve,
    /// Network error, non-200 response or cancellation.
    Transfer,
    /// The output file could not be created or written.
    Filesystem,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Resolve => "resolve",
            FailureKind::Transfer => "transfer",
            FailureKind::Filesystem => "filesystem",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Succeeded { bytes: u64 },
    Failed { kind: FailureKind, message: String },
}

/// Terminal result of one dispatched download task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub id: String,
    pub destination: PathBuf,
    pub status: OutcomeStatus,
}

impl DownloadOutcome {
    pub fn succeeded(id: impl Into<String>, destination: impl Into<PathBuf>, bytes: u64) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            status: OutcomeStatus::Succeeded { bytes },
        }
    }

    pub fn failed(
        id: impl Into<String>,
        destination: impl Into<PathBuf>,
        kind: FailureKind,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            status: OutcomeStatus::Failed {
                kind,
                message: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.status {
            OutcomeStatus::Failed { kind, .. } => Some(kind),
            OutcomeStatus::Succeeded { .. } => None,
        }
    }
}

/// Everything that happened in one batch.
///
/// `outcomes` holds exactly one entry per dispatched task, in no particular
/// order. `skipped` lists manifest entries that never became tasks.
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub outcomes: Vec<DownloadOutcome>,
    pub skipped: Vec<SkippedAsset>,
}

impl DownloadReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Number of failures in the given stage.
    pub fn failed_with(&self, kind: FailureKind) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.failure_kind() == Some(kind))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Manifest entries seen, dispatched or not.
    pub fn total(&self) -> usize {
        self.outcomes.len() + self.skipped.len()
    }

    pub fn bytes_written(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                OutcomeStatus::Succeeded { bytes } => bytes,
                OutcomeStatus::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn outcome(&self, id: &str) -> Option<&DownloadOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} failed, {} skipped ({} bytes)",
            self.succeeded(),
            self.failed(),
            self.skipped_count(),
            self.bytes_written()
        )
    }
}
