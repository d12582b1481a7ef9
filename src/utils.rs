//! Utility helpers used across the crate.
//!
//! Small convenience functions for extension extraction, output filename
//! construction and HTTP client setup.
use crate::error::UrlParseError;
use percent_encoding::percent_decode_str;
use sanitize_filename::sanitize;
use std::time::Duration;
use url::Url;

/// Connection settings shared by the manifest request and every asset
/// transfer.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    /// Deadline for a whole request, body included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: concat!("wallfetch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Builds the HTTP client used for the manifest and all asset downloads.
pub fn build_client(options: &ClientOptions) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout)
        .connect_timeout(options.connect_timeout)
        .build()
}

/// Extracts the file extension from the path component of a URL.
///
/// The extension is the suffix of the last path element starting at its
/// final `.`, leading dot included (`.png`). A path without such a suffix
/// yields an empty string. Query strings and fragments are ignored, and the
/// path is percent-decoded before it is inspected.
///
/// # Errors
///
/// Returns [`UrlParseError`] if `url` is not an absolute URL. Relative
/// references such as `images/wall.png` have no base to resolve against and
/// are rejected too, so their entries are skipped rather than attempted.
pub fn get_extension(url: &str) -> Result<String, UrlParseError> {
    let parsed = Url::parse(url).map_err(|source| UrlParseError {
        url: url.to_string(),
        source,
    })?;

    let path = percent_decode_str(parsed.path()).decode_utf8_lossy();
    let last = path.rsplit('/').next().unwrap_or_default();

    Ok(last
        .rfind('.')
        .map(|i| last[i..].to_string())
        .unwrap_or_default())
}

/// Builds the on-disk filename `<id><extension>` for an asset.
///
/// The result is sanitized so that ids containing path separators or other
/// reserved characters always land directly inside the destination directory.
/// Distinct ids can sanitize to the same name;
/// [`plan_tasks`](crate::task::plan_tasks) keeps names unique.
pub fn asset_file_name(id: &str, extension: &str) -> String {
    sanitize(format!("{id}{extension}"))
}
