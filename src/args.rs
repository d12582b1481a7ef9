use clap::Parser;
use std::path::PathBuf;

/// Fetches the wallpaper manifest and downloads every image concurrently.
///
/// Images are saved as `<id><extension>` inside the output directory.
/// Flags override values from the config file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// URL of the JSON manifest listing the assets.
    #[arg(long)]
    pub manifest_url: Option<String>,

    /// Directory to save assets in. Defaults to "downloads" in the current directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Max number of assets to download at the same time.
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Read settings from this file instead of the default config location.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
