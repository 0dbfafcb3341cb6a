//! Placeholder image generator for the jewelry storefront.
//!
//! Regenerates every placeholder under the asset root:
//!   cargo run -- --root public/assets/images
//!
//! Only the diamond cuts, with a custom palette file:
//!   cargo run -- --config assets/config/placeholders.ron --only diamond

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use gem_placeholders::{
    batch::{self, BatchOptions},
    JobSet, PlaceholderConfig, RenderError, Renderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SetArg {
    /// Jewelry thumbnails, diamond cuts and grade charts.
    Detailed,
    /// Plain bordered cards.
    Simple,
    All,
}

#[derive(Parser, Debug)]
#[command(about = "Generate placeholder jewelry images until real photography exists", version, author)]
struct Args {
    /// Output root; defaults to the config's `output_root` (public/assets/images).
    #[arg(long)] root: Option<PathBuf>,
    /// RON file overriding palette, style, fonts or the job list.
    #[arg(long)] config: Option<PathBuf>,
    /// TrueType font file or name looked up in the configured font dirs.
    #[arg(long)] font: Option<String>,
    #[arg(long, value_enum, default_value_t = SetArg::All)] set: SetArg,
    /// Only render one kind: ring, necklace, diamond, diamond:<cut>, color-chart, clarity-chart, card.
    #[arg(long)] only: Option<String>,
    /// Write a JSON listing of generated files.
    #[arg(long)] manifest: Option<PathBuf>,
    /// Resolve and log the jobs without writing anything.
    #[arg(long)] dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlaceholderConfig::load_from_file(path)
            .map_err(RenderError::Config)
            .with_context(|| format!("load config {}", path.display()))?,
        None => PlaceholderConfig::default(),
    };
    if let Some(font) = args.font {
        config.fonts.family = font;
    }
    for w in config.validate() {
        warn!("config: {w}");
    }

    let opts = BatchOptions {
        root: args.root,
        set: match args.set {
            SetArg::Detailed => Some(JobSet::Detailed),
            SetArg::Simple => Some(JobSet::Simple),
            SetArg::All => None,
        },
        only: args.only,
        dry_run: args.dry_run,
    };

    info!("Generating placeholder images...");
    let renderer = Renderer::new(&config);
    let assets = batch::run(&config, &renderer, &opts).context("placeholder generation aborted")?;

    if let Some(path) = &args.manifest {
        if !args.dry_run {
            batch::write_manifest(path, &assets).with_context(|| format!("write manifest {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
    }
    if !args.dry_run {
        info!("{} placeholder images generated; replace them with production assets when available.", assets.len());
    }
    Ok(())
}
