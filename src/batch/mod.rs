//! Turns the configured job list into render requests and runs them in order.
//!
//! Every request is resolved (palette lookups, cut names) before anything is
//! written, then all output directories are created, then images are rendered
//! one by one. The first failure aborts the run.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::{debug, info};
use serde::Serialize;

use crate::core::{
    color::Color,
    config::{Job, JobSet, PlaceholderConfig},
    error::RenderError,
};
use crate::rendering::{DiamondCut, RenderRequest, RenderedAsset, Renderer, ShapeKind};

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Overrides `config.output_root` when set.
    pub root: Option<PathBuf>,
    /// Restrict to one set; `None` runs everything.
    pub set: Option<JobSet>,
    /// Restrict to one kind; `diamond` matches every cut.
    pub only: Option<String>,
    pub dry_run: bool,
}

fn lookup(map: &BTreeMap<String, Color>, role: &'static str, name: &str) -> Result<Color, RenderError> {
    map.get(name).copied().ok_or_else(|| RenderError::UnknownColor { role, name: name.to_string() })
}

/// Resolve one job against the palette and style tables.
pub fn build_request(job: &Job, config: &PlaceholderConfig, root: &Path) -> Result<RenderRequest, RenderError> {
    let output = root.join(job.file());
    let size = job.size();
    let name = PlaceholderConfig::display_name;
    let req = match job {
        Job::Ring { metal, stone, .. } => {
            let (m, s) = (lookup(&config.palette.metals, "metal", metal)?, lookup(&config.palette.stones, "stone", stone)?);
            RenderRequest::new(ShapeKind::Ring, size, m, output)
                .with_accent(s)
                .with_label(format!("{} Ring ({})", name(stone), name(metal)))
        }
        Job::Necklace { metal, stone, .. } => {
            let (m, s) = (lookup(&config.palette.metals, "metal", metal)?, lookup(&config.palette.stones, "stone", stone)?);
            RenderRequest::new(ShapeKind::Necklace, size, m, output)
                .with_accent(s)
                .with_label(format!("{} Pendant ({})", name(stone), name(metal)))
        }
        Job::Diamond { cut, .. } => {
            let cut: DiamondCut = cut.parse()?;
            RenderRequest::new(ShapeKind::DiamondCut(cut), size, config.style.diamond.fill, output).with_label(cut.caption())
        }
        Job::ColorGrades { .. } => {
            RenderRequest::new(ShapeKind::ColorChart, size, config.style.chart_ink, output).with_label(config.grades.color_title.clone())
        }
        Job::ClarityGrades { .. } => {
            RenderRequest::new(ShapeKind::ClarityChart, size, config.style.chart_ink, output).with_label(config.grades.clarity_title.clone())
        }
        Job::Card { text, .. } => RenderRequest::new(ShapeKind::Card, size, config.style.card.text, output).with_label(text.clone()),
    };
    Ok(req)
}

/// Parsed `--only` value: one exact kind, or every diamond cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Kind(ShapeKind),
    AnyDiamond,
}

impl KindFilter {
    pub fn matches(self, kind: &ShapeKind) -> bool {
        match self {
            KindFilter::Kind(k) => k == *kind,
            KindFilter::AnyDiamond => matches!(kind, ShapeKind::DiamondCut(_)),
        }
    }
}

impl FromStr for KindFilter {
    type Err = RenderError;
    /// Anything `ShapeKind` accepts, plus bare `diamond` / `diamond-cut`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diamond" | "diamond-cut" => Ok(KindFilter::AnyDiamond),
            _ => s.parse().map(KindFilter::Kind),
        }
    }
}

/// Where a run writes: `opts.root` or the configured `output_root`.
pub fn output_root(config: &PlaceholderConfig, opts: &BatchOptions) -> PathBuf {
    opts.root.clone().unwrap_or_else(|| config.output_root.clone())
}

/// Requests for every selected job, in manifest order. A filter that names no
/// known kind is an error, not an empty plan.
pub fn plan(config: &PlaceholderConfig, opts: &BatchOptions) -> Result<Vec<RenderRequest>, RenderError> {
    let filter = opts.only.as_deref().map(str::parse::<KindFilter>).transpose()?;
    let root = output_root(config, opts);
    let mut out = Vec::new();
    for job in &config.jobs {
        if opts.set.is_some_and(|set| set != job.set()) {
            continue;
        }
        let req = build_request(job, config, &root)?;
        if filter.is_some_and(|f| !f.matches(&req.kind)) {
            continue;
        }
        out.push(req);
    }
    Ok(out)
}

/// Create each distinct parent of `requests` plus every `extra` directory;
/// existing directories are fine.
pub fn ensure_dirs(requests: &[RenderRequest], extra: &[PathBuf]) -> Result<(), RenderError> {
    let dirs: BTreeSet<&Path> = requests
        .iter()
        .filter_map(|r| r.output.parent())
        .chain(extra.iter().map(PathBuf::as_path))
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    for dir in dirs {
        fs::create_dir_all(dir).map_err(|source| RenderError::Io { path: dir.to_path_buf(), source })?;
        debug!("ensured {}", dir.display());
    }
    Ok(())
}

/// `extra_dirs` belong to the detailed set and are skipped by filtered runs.
fn extra_dirs(config: &PlaceholderConfig, opts: &BatchOptions) -> Vec<PathBuf> {
    if opts.only.is_some() || opts.set == Some(JobSet::Simple) {
        return Vec::new();
    }
    let root = output_root(config, opts);
    config.extra_dirs.iter().map(|d| root.join(d)).collect()
}

pub fn run(config: &PlaceholderConfig, renderer: &Renderer, opts: &BatchOptions) -> Result<Vec<RenderedAsset>, RenderError> {
    let requests = plan(config, opts)?;
    if opts.dry_run {
        for r in &requests {
            info!("would render {} {}x{} -> {}", r.kind, r.width, r.height, r.output.display());
        }
        return Ok(Vec::new());
    }
    ensure_dirs(&requests, &extra_dirs(config, opts))?;
    requests.iter().map(|r| renderer.render(r)).collect()
}

#[derive(Serialize)]
struct ManifestRoot<'a> {
    version: u32,
    assets: &'a [RenderedAsset],
}

/// JSON listing of what a run produced.
pub fn write_manifest(path: &Path, assets: &[RenderedAsset]) -> Result<(), RenderError> {
    let json = serde_json::to_string_pretty(&ManifestRoot { version: 1, assets })
        .map_err(|source| RenderError::Manifest { path: path.to_path_buf(), source })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::Io { path: parent.to_path_buf(), source })?;
    }
    fs::write(path, json).map_err(|source| RenderError::Io { path: path.to_path_buf(), source })
}
