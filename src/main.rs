use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wallfetch::config::Settings;
use wallfetch::downloader::DEFAULT_MAX_CONCURRENT;
use wallfetch::utils::{self, ClientOptions};
use wallfetch::{Args, DEFAULT_MANIFEST_URL, Downloader, DownloaderConfig, ManifestResolver};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},hyper=warn,reqwest=warn,h2=warn")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load_or_default(),
    };

    let defaults = ClientOptions::default();
    let client_options = ClientOptions {
        user_agent: settings.user_agent.unwrap_or(defaults.user_agent),
        timeout: args
            .timeout
            .or(settings.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout),
        connect_timeout: settings
            .connect_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.connect_timeout),
    };
    let manifest_url = args
        .manifest_url
        .or(settings.manifest_url)
        .unwrap_or_else(|| DEFAULT_MANIFEST_URL.to_string());
    let output_dir = args
        .output_dir
        .or(settings.output_dir)
        .unwrap_or_else(|| PathBuf::from("downloads"));
    let max_concurrent = args
        .concurrency
        .or(settings.concurrency)
        .unwrap_or(DEFAULT_MAX_CONCURRENT);

    let client = utils::build_client(&client_options).context("Failed to build HTTP client")?;

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, cancelling remaining downloads...");
            signal_token.cancel();
        }
    });

    let resolver = ManifestResolver::new(client.clone(), manifest_url);
    let downloader = Downloader::new(client, DownloaderConfig { max_concurrent })
        .with_cancellation(cancel_token);

    let report = wallfetch::run(&resolver, &downloader, &output_dir)
        .await
        .context("Download run failed")?;

    println!("{report}");
    println!("Time taken: {:.2?}", start.elapsed());
    Ok(())
}
