//! Boundary dataset downloader.
//!
//! Fetches the country GeoJSON from the primary source, falling back to the
//! alternative source, and stores it for the rasterizer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use asciimap::config::Config;
use asciimap::source::Downloader;

#[derive(Parser, Debug)]
#[command(name = "fetch")]
#[command(about = "Download country boundary GeoJSON")]
struct Args {
    /// Destination file
    #[arg(short, long, default_value = "assets/world.json")]
    output: PathBuf,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Primary dataset URL
    #[arg(long)]
    primary_url: Option<String>,

    /// Alternative dataset URL used when the primary fails
    #[arg(long)]
    fallback_url: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Asciimap Fetch");

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(url) = args.primary_url {
        config.source.primary_url = url;
    }
    if let Some(url) = args.fallback_url {
        config.source.fallback_url = Some(url);
    }
    config.source.validate().context("Invalid source configuration")?;

    info!("This may take a moment (large file)...");

    let downloader = Downloader::new(config.source, config.input.id_properties)?;
    let report = downloader
        .fetch(&args.output)
        .await
        .context("Failed to download boundary data")?;

    info!(
        "Successfully downloaded {} to {} ({} bytes, {} features, {} countries, xxh64 {:016x})",
        report.url,
        report.path.display(),
        report.bytes,
        report.features,
        report.countries,
        report.digest
    );

    Ok(())
}
