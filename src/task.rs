//! Turning manifest entries into download tasks.
use crate::error::SkipReason;
use crate::manifest::AssetManifest;
use crate::utils;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

/// One asset to fetch: where it comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub id: String,
    pub url: String,
    pub destination: PathBuf,
}

/// A manifest entry that produced no task.
#[derive(Debug, Clone)]
pub struct SkippedAsset {
    pub id: String,
    pub reason: SkipReason,
}

/// Result of planning a batch.
#[derive(Debug, Default)]
pub struct TaskPlan {
    pub tasks: Vec<DownloadTask>,
    pub skipped: Vec<SkippedAsset>,
}

struct Candidate<'a> {
    id: &'a str,
    url: &'a str,
    file_name: String,
    /// The file name is `<id><extension>` unchanged by sanitizing.
    verbatim: bool,
}

/// Builds one task per manifest entry whose URL yields an extension.
///
/// Each destination is `dest_dir/<id><extension>`, sanitized. Every task
/// gets a distinct file name. An entry is listed in [`TaskPlan::skipped`]
/// instead when its URL does not parse (it never gets a fallback
/// extension), when sanitizing leaves no name or drops the extension, or
/// when its name is already taken by another entry. Names that needed no
/// sanitizing win a collision, otherwise the first id in order does.
pub fn plan_tasks(manifest: &AssetManifest, dest_dir: &Path) -> TaskPlan {
    let mut plan = TaskPlan::default();
    let mut candidates = Vec::with_capacity(manifest.len());

    for (id, url) in manifest.iter() {
        let extension = match utils::get_extension(url) {
            Ok(extension) => extension,
            Err(error) => {
                plan.skipped.push(SkippedAsset {
                    id: id.to_string(),
                    reason: error.into(),
                });
                continue;
            }
        };

        let file_name = utils::asset_file_name(id, &extension);
        if file_name.is_empty() || !file_name.ends_with(extension.as_str()) {
            plan.skipped.push(SkippedAsset {
                id: id.to_string(),
                reason: SkipReason::UnusableName { file_name },
            });
            continue;
        }

        let verbatim = file_name == format!("{id}{extension}");
        candidates.push(Candidate {
            id,
            url,
            file_name,
            verbatim,
        });
    }

    // Stable, so ties keep manifest order
    candidates.sort_by_key(|c| !c.verbatim);

    let mut claimed: HashMap<String, &str> = HashMap::with_capacity(candidates.len());
    for candidate in candidates {
        match claimed.entry(candidate.file_name) {
            Entry::Occupied(taken) => plan.skipped.push(SkippedAsset {
                id: candidate.id.to_string(),
                reason: SkipReason::NameCollision {
                    file_name: taken.key().clone(),
                    taken_by: taken.get().to_string(),
                },
            }),
            Entry::Vacant(slot) => {
                plan.tasks.push(DownloadTask {
                    id: candidate.id.to_string(),
                    url: candidate.url.to_string(),
                    destination: dest_dir.join(slot.key()),
                });
                slot.insert(candidate.id);
            }
        }
    }

    plan
}
