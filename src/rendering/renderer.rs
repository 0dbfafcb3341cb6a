//! Placeholder renderer: request types and the shape-kind dispatch.

use std::{fmt, path::PathBuf, str::FromStr};

use log::info;
use serde::Serialize;

use super::{canvas::Canvas, scenes, text::FontBook};
use crate::core::{
    color::Color,
    config::{GradeTables, PlaceholderConfig, StyleConfig},
    error::RenderError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiamondCut {
    Round,
    Princess,
    Cushion,
    Oval,
    Emerald,
}

impl DiamondCut {
    pub const ALL: [DiamondCut; 5] = [DiamondCut::Round, DiamondCut::Princess, DiamondCut::Cushion, DiamondCut::Oval, DiamondCut::Emerald];

    pub fn name(self) -> &'static str {
        match self {
            DiamondCut::Round => "round",
            DiamondCut::Princess => "princess",
            DiamondCut::Cushion => "cushion",
            DiamondCut::Oval => "oval",
            DiamondCut::Emerald => "emerald",
        }
    }

    /// Caption drawn under the stone, e.g. `Round Cut`.
    pub fn caption(self) -> String {
        format!("{} Cut", PlaceholderConfig::display_name(self.name()))
    }
}

impl FromStr for DiamondCut {
    type Err = RenderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        DiamondCut::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| RenderError::UnsupportedCut(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Ring,
    Necklace,
    DiamondCut(DiamondCut),
    ColorChart,
    ClarityChart,
    Card,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Ring => f.write_str("ring"),
            ShapeKind::Necklace => f.write_str("necklace"),
            ShapeKind::DiamondCut(cut) => write!(f, "diamond:{}", cut.name()),
            ShapeKind::ColorChart => f.write_str("color-chart"),
            ShapeKind::ClarityChart => f.write_str("clarity-chart"),
            ShapeKind::Card => f.write_str("card"),
        }
    }
}

impl FromStr for ShapeKind {
    type Err = RenderError;
    /// Accepts `ring`, `necklace`, `diamond:<cut>` (or `diamond-cut:<cut>`),
    /// `color-chart`, `clarity-chart` and `card`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some((head, cut)) = lower.split_once(':') {
            return match head {
                "diamond" | "diamond-cut" => Ok(ShapeKind::DiamondCut(cut.parse()?)),
                _ => Err(RenderError::UnsupportedShape(s.to_string())),
            };
        }
        match lower.as_str() {
            "ring" => Ok(ShapeKind::Ring),
            "necklace" => Ok(ShapeKind::Necklace),
            "color-chart" | "color-grades" => Ok(ShapeKind::ColorChart),
            "clarity-chart" | "clarity-grades" => Ok(ShapeKind::ClarityChart),
            "card" => Ok(ShapeKind::Card),
            _ => Err(RenderError::UnsupportedShape(s.to_string())),
        }
    }
}

/// Everything one render needs.
///
/// `primary` is the dominant ink of the kind: the metal for rings and
/// necklaces, the body fill for diamond cuts, line and text ink for charts and
/// the text color of cards. `accent` is the stone color of rings and necklaces.
/// `label` is the caption (item description, cut name or chart title).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub kind: ShapeKind,
    pub width: u32,
    pub height: u32,
    pub primary: Color,
    pub accent: Option<Color>,
    pub label: String,
    pub output: PathBuf,
}

impl RenderRequest {
    pub fn new(kind: ShapeKind, size: (u32, u32), primary: Color, output: impl Into<PathBuf>) -> Self {
        Self { kind, width: size.0, height: size.1, primary, accent: None, label: String::new(), output: output.into() }
    }
    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = Some(accent);
        self
    }
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedAsset {
    pub path: PathBuf,
    pub kind: String,
    pub width: u32,
    pub height: u32,
}

/// Holds the read-only style tables and loaded fonts shared by every render.
pub struct Renderer {
    pub(crate) style: StyleConfig,
    pub(crate) grades: GradeTables,
    pub(crate) fonts: FontBook,
}

impl Renderer {
    pub fn new(config: &PlaceholderConfig) -> Self {
        Self::with_fonts(config, FontBook::load(&config.fonts))
    }

    pub fn with_fonts(config: &PlaceholderConfig, fonts: FontBook) -> Self {
        Self { style: config.style.clone(), grades: config.grades.clone(), fonts }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Draw `req` into a fresh canvas without touching the filesystem.
    pub fn paint(&self, req: &RenderRequest) -> Canvas {
        match req.kind {
            ShapeKind::Ring => scenes::ring::paint(self, req),
            ShapeKind::Necklace => scenes::necklace::paint(self, req),
            ShapeKind::DiamondCut(cut) => scenes::diamond::paint(self, req, cut),
            ShapeKind::ColorChart => scenes::color_chart::paint(self, req),
            ShapeKind::ClarityChart => scenes::clarity_chart::paint(self, req),
            ShapeKind::Card => scenes::card::paint(self, req),
        }
    }

    /// Paint and encode to `req.output`. The output directory must exist.
    pub fn render(&self, req: &RenderRequest) -> Result<RenderedAsset, RenderError> {
        let canvas = self.paint(req);
        canvas.save(&req.output)?;
        info!("Created {}", req.output.display());
        Ok(RenderedAsset { path: req.output.clone(), kind: req.kind.to_string(), width: req.width, height: req.height })
    }
}
