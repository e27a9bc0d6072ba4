//! Boundary rasterizer.
//!
//! Loads a GeoJSON FeatureCollection, labels every grid cell with the region
//! of the first containing country, and prints the grid as a constant
//! declaration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use xxhash_rust::xxh64::xxh64;

use asciimap::config::Config;
use asciimap::output::{serialize, OutputFormat};
use asciimap::raster::rasterize_with_progress;
use asciimap::source::{load_collection, write_atomically};

#[derive(Parser, Debug)]
#[command(name = "rasterize")]
#[command(about = "Rasterize country boundaries into a grid of region labels")]
struct Args {
    /// GeoJSON FeatureCollection (optionally .gz)
    #[arg(short, long, default_value = "assets/world.json")]
    input: PathBuf,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Grid column count
    #[arg(long)]
    width: Option<usize>,

    /// Grid row count
    #[arg(long)]
    height: Option<usize>,

    /// Output framing
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Declaration name for js/rust output
    #[arg(long)]
    name: Option<String>,

    /// Subtract polygon holes instead of testing exterior rings only
    #[arg(long)]
    subtract_holes: bool,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Apply command-line overrides on top of the file config
    fn apply(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.grid.width = width;
        }
        if let Some(height) = self.height {
            config.grid.height = height;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(ref name) = self.name {
            config.output.name = name.clone();
        }
        if self.subtract_holes {
            config.grid.subtract_holes = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the grid
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Asciimap Rasterizer");

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    if config.grid.subtract_holes {
        warn!("Hole subtraction enabled: interior rings are excluded from coverage");
    }

    let table = config.region_table()?;
    info!(
        "Region table: {} sets, default label '{}'",
        table.sets().len(),
        table.default_label()
    );

    let collection = load_collection(&args.input, &config.input.id_properties)
        .with_context(|| format!("Failed to load boundaries from {}", args.input.display()))?;
    if collection.is_empty() {
        warn!("Feature collection is empty; the grid will be all background");
    }

    let options = config.raster_options();

    let pb = ProgressBar::new(options.grid.height as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows")?
            .progress_chars("#>-"),
    );

    let grid = rasterize_with_progress(&collection, &table, &options, |_| pb.inc(1));
    pb.finish_and_clear();

    for (label, count) in grid.label_counts() {
        info!("  '{}': {} cells", label, count);
    }

    let text = serialize(&grid, config.output.format, &config.output.name)?;
    info!("Output digest: {:016x}", xxh64(text.as_bytes(), 0));

    match &args.output {
        Some(path) => {
            write_atomically(path, text.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} rows to {}", grid.height(), path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

