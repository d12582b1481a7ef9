//! Remote manifest retrieval.
//!
//! The manifest is a JSON document with a top-level `data` object mapping
//! asset ids to description objects. Each description may carry a `dhd`
//! field holding the high-definition download URL.
use crate::error::FetchError;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Endpoint queried when neither the CLI nor the config file names one.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://storage.googleapis.com/panels-api/data/20240916/media-1a-i-p~s";

/// Field of an asset description that holds its download URL.
const DOWNLOAD_URL_FIELD: &str = "dhd";

/// Mapping from asset id to source URL.
///
/// Ids are unique. Iteration is ordered by id so logs and reports are stable
/// between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    entries: BTreeMap<String, String>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any previous URL for the same id.
    pub fn insert(&mut self, id: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(id.into(), url.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssetManifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Picks the download URL out of every asset description in `data`.
///
/// Entries are skipped when the description is not an object, is an empty
/// object, or has no string `dhd` field.
pub fn extract_download_urls(data: &serde_json::Map<String, Value>) -> AssetManifest {
    data.iter()
        .filter_map(|(id, description)| {
            let fields = description.as_object().filter(|o| !o.is_empty())?;
            match fields.get(DOWNLOAD_URL_FIELD).and_then(Value::as_str) {
                Some(url) => Some((id.clone(), url.to_string())),
                None => {
                    debug!(id = %id, "No download url in asset description, skipping");
                    None
                }
            }
        })
        .collect()
}

/// Decodes a raw manifest body into an [`AssetManifest`].
///
/// # Errors
///
/// Returns [`FetchError::Decode`] for invalid JSON and
/// [`FetchError::MissingData`] when there is no top-level `data` object.
pub fn parse_manifest(body: &[u8]) -> Result<AssetManifest, FetchError> {
    let document: Value = serde_json::from_slice(body)?;
    let data = document
        .get("data")
        .and_then(Value::as_object)
        .ok_or(FetchError::MissingData)?;

    Ok(extract_download_urls(data))
}

/// Fetches the manifest from a fixed endpoint.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    client: Client,
    url: String,
}

impl ManifestResolver {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads and decodes the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The network request fails.
    /// * The server returns anything other than `200 OK`.
    /// * The body is not JSON or has no `data` object.
    pub async fn resolve(&self) -> Result<AssetManifest, FetchError> {
        info!(url = %self.url, "Fetching manifest");
        let response = self.client.get(&self.url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.bytes().await?;
        parse_manifest(&body)
    }
}
