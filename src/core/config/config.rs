use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use crate::core::color::Color;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// File name or path of the TrueType face. Bare names are also looked up
    /// inside `search_dirs`.
    pub family: String,
    pub search_dirs: Vec<PathBuf>,
    pub title_px: f32,
    pub label_px: f32,
    pub caption_px: f32,
    pub small_px: f32,
}
impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Arial.ttf".into(),
            search_dirs: vec![
                "assets/fonts".into(),
                "/usr/share/fonts/truetype/msttcorefonts".into(),
                "/usr/share/fonts/TTF".into(),
                "/Library/Fonts".into(),
                "/System/Library/Fonts/Supplemental".into(),
                "C:\\Windows\\Fonts".into(),
            ],
            title_px: 24.0,
            label_px: 20.0,
            caption_px: 16.0,
            small_px: 14.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DiamondStyle {
    pub fill: Color,
    pub outline: Color,
    pub outline_width: f32,
    pub facet: Color,
    pub label: Color,
    pub watermark: Color,
}
impl Default for DiamondStyle {
    fn default() -> Self {
        Self {
            fill: Color::rgba(240, 240, 255, 220),
            outline: Color::WHITE,
            outline_width: 2.0,
            facet: Color::rgba(255, 255, 255, 128),
            label: Color::WHITE,
            watermark: Color::rgba(255, 255, 255, 128),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CardStyle {
    pub background: Color,
    pub text: Color,
    pub border: Color,
    pub border_width: u32,
    pub instruction: String,
}
impl Default for CardStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(240, 240, 240),
            text: Color::rgb(150, 150, 150),
            border: Color::rgb(200, 200, 200),
            border_width: 4,
            instruction: "Add real assets using the guide".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub background: Color,
    pub label: Color,
    pub watermark: Color,
    pub watermark_text: String,
    pub chart_ink: Color,
    /// Stone body for clarity-chart cells and for jewelry requests without an accent.
    pub stone: Color,
    pub inclusion_radius: i32,
    pub diamond: DiamondStyle,
    pub card: CardStyle,
}
impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            label: Color::rgb(100, 100, 100),
            watermark: Color::rgba(200, 200, 200, 128),
            watermark_text: "PLACEHOLDER".into(),
            chart_ink: Color::BLACK,
            stone: Color::rgb(240, 240, 255),
            inclusion_radius: 2,
            diamond: DiamondStyle::default(),
            card: CardStyle::default(),
        }
    }
}

/// Named metal and stone colors referenced by jobs.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub metals: BTreeMap<String, Color>,
    pub stones: BTreeMap<String, Color>,
}
impl Default for Palette {
    fn default() -> Self {
        let metals = [
            ("gold", Color::rgb(196, 162, 101)),
            ("platinum", Color::rgb(229, 228, 226)),
        ];
        let stones = [
            ("diamond", Color::rgb(240, 240, 255)),
            ("ruby", Color::rgb(224, 17, 95)),
            ("sapphire", Color::rgb(15, 82, 186)),
        ];
        Self {
            metals: metals.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            stones: stones.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColorGrade {
    pub grade: String,
    pub color: Color,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GradeTables {
    pub color_title: String,
    pub color: Vec<ColorGrade>,
    pub clarity_title: String,
    pub clarity: Vec<String>,
}
impl Default for GradeTables {
    fn default() -> Self {
        let color = [
            ("D", 0xF7, 0xF7, 0xF7),
            ("E", 0xF7, 0xF7, 0xF2),
            ("F", 0xF7, 0xF7, 0xED),
            ("G", 0xF7, 0xF7, 0xE7),
            ("H", 0xF5, 0xF5, 0xDB),
            ("I", 0xF3, 0xF3, 0xD0),
            ("J", 0xF0, 0xF0, 0xC0),
            ("K", 0xED, 0xED, 0xB0),
        ];
        Self {
            color_title: "Diamond Color Grades".into(),
            color: color
                .into_iter()
                .map(|(g, r, gg, b)| ColorGrade { grade: g.into(), color: Color::rgb(r, gg, b) })
                .collect(),
            clarity_title: "Diamond Clarity Grades".into(),
            clarity: ["FL", "IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2"].map(String::from).to_vec(),
        }
    }
}

/// Which of the two generated sets a job belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSet {
    /// Jewelry thumbnails, diamond cuts and grade charts.
    Detailed,
    /// Plain bordered cards for missing assets.
    Simple,
}

fn square_600() -> (u32, u32) { (600, 600) }
fn square_800() -> (u32, u32) { (800, 800) }
fn square_400() -> (u32, u32) { (400, 400) }

/// One image of the asset manifest. `file` is relative to the output root.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub enum Job {
    Ring { file: PathBuf, metal: String, stone: String, #[serde(default = "square_600")] size: (u32, u32) },
    Necklace { file: PathBuf, metal: String, stone: String, #[serde(default = "square_600")] size: (u32, u32) },
    Diamond { file: PathBuf, cut: String, #[serde(default = "square_800")] size: (u32, u32) },
    ColorGrades { file: PathBuf, #[serde(default = "square_600")] size: (u32, u32) },
    ClarityGrades { file: PathBuf, #[serde(default = "square_600")] size: (u32, u32) },
    Card { file: PathBuf, text: String, #[serde(default = "square_400")] size: (u32, u32) },
}

impl Job {
    pub fn file(&self) -> &Path {
        match self {
            Job::Ring { file, .. }
            | Job::Necklace { file, .. }
            | Job::Diamond { file, .. }
            | Job::ColorGrades { file, .. }
            | Job::ClarityGrades { file, .. }
            | Job::Card { file, .. } => file,
        }
    }
    pub fn size(&self) -> (u32, u32) {
        match self {
            Job::Ring { size, .. }
            | Job::Necklace { size, .. }
            | Job::Diamond { size, .. }
            | Job::ColorGrades { size, .. }
            | Job::ClarityGrades { size, .. }
            | Job::Card { size, .. } => *size,
        }
    }
    pub fn set(&self) -> JobSet {
        match self {
            Job::Card { .. } => JobSet::Simple,
            _ => JobSet::Detailed,
        }
    }
}

fn default_jobs() -> Vec<Job> {
    let ring = |file: &str, metal: &str, stone: &str| Job::Ring {
        file: format!("thumbnails/rings/{file}").into(),
        metal: metal.into(),
        stone: stone.into(),
        size: square_600(),
    };
    let necklace = |file: &str, metal: &str, stone: &str| Job::Necklace {
        file: format!("thumbnails/necklaces/{file}").into(),
        metal: metal.into(),
        stone: stone.into(),
        size: square_600(),
    };
    let card = |file: &str, text: &str, size: (u32, u32)| Job::Card {
        file: format!("placeholders/{file}").into(),
        text: text.into(),
        size,
    };
    let mut jobs = vec![
        ring("diamond-solitaire.jpg", "platinum", "diamond"),
        ring("ruby-solitaire.jpg", "gold", "ruby"),
        ring("sapphire-solitaire.jpg", "platinum", "sapphire"),
        necklace("diamond-pendant.jpg", "platinum", "diamond"),
        necklace("sapphire-pendant.jpg", "platinum", "sapphire"),
    ];
    for cut in ["round", "princess", "cushion", "oval", "emerald"] {
        jobs.push(Job::Diamond { file: format!("diamonds/{cut}/{cut}-top.png").into(), cut: cut.into(), size: square_800() });
    }
    jobs.push(Job::ColorGrades { file: "diamonds/colors/color-grades.jpg".into(), size: square_600() });
    jobs.push(Job::ClarityGrades { file: "diamonds/clarity/clarity-grades.jpg".into(), size: square_600() });
    jobs.extend([
        card("product.jpg", "Product Image", square_400()),
        card("diamond.png", "Diamond Image", square_400()),
        card("thumbnail.jpg", "Thumbnail", (100, 100)),
        card("icon.png", "Icon", (48, 48)),
    ]);
    jobs
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlaceholderConfig {
    pub output_root: PathBuf,
    /// Directories under the root created by a full detailed run even though
    /// no job writes into them yet.
    pub extra_dirs: Vec<PathBuf>,
    pub fonts: FontConfig,
    pub style: StyleConfig,
    pub palette: Palette,
    pub grades: GradeTables,
    pub jobs: Vec<Job>,
}
impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            output_root: "public/assets/images".into(),
            extra_dirs: vec!["thumbnails/earrings".into(), "thumbnails/bracelets".into()],
            fonts: Default::default(),
            style: Default::default(),
            palette: Default::default(),
            grades: Default::default(),
            jobs: default_jobs(),
        }
    }
}

impl PlaceholderConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config {}: {e}", path.as_ref().display()))?;
        ron::from_str(&data).map_err(|e| format!("parse RON {}: {e}", path.as_ref().display()))
    }
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Display name for a palette key, e.g. `platinum` -> `Platinum`.
    pub fn display_name(key: &str) -> String {
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Non-fatal findings; callers log them and carry on.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.grades.color.is_empty() {
            w.push("grades.color is empty; color chart will only show title and watermark".into());
        }
        if self.grades.clarity.is_empty() {
            w.push("grades.clarity is empty; clarity chart will only show title and watermark".into());
        }
        if self.grades.clarity.len() > 8 {
            w.push(format!(
                "grades.clarity has {} entries; cells past the second row fall outside a square canvas",
                self.grades.clarity.len()
            ));
        }
        for (label, px) in [
            ("fonts.title_px", self.fonts.title_px),
            ("fonts.label_px", self.fonts.label_px),
            ("fonts.caption_px", self.fonts.caption_px),
            ("fonts.small_px", self.fonts.small_px),
        ] {
            if px <= 0.0 {
                w.push(format!("{label} {px} must be > 0"));
            }
        }
        if self.jobs.is_empty() {
            w.push("jobs is empty; nothing will be generated".into());
        }
        let mut seen = HashSet::new();
        for job in &self.jobs {
            let file = job.file();
            let (width, height) = job.size();
            if width == 0 || height == 0 {
                w.push(format!("{}: zero-sized canvas {width}x{height}", file.display()));
            }
            if !seen.insert(file.to_path_buf()) {
                w.push(format!("{}: listed more than once; later job overwrites earlier", file.display()));
            }
            if let Job::Ring { metal, stone, .. } | Job::Necklace { metal, stone, .. } = job {
                if !self.palette.metals.contains_key(metal) {
                    w.push(format!("{}: metal {metal:?} not in palette.metals", file.display()));
                }
                if !self.palette.stones.contains_key(stone) {
                    w.push(format!("{}: stone {stone:?} not in palette.stones", file.display()));
                }
            }
        }
        w
    }
}
