//! Font loading with built-in fallback, text measurement and anchored drawing.

use std::{fs, path::PathBuf, sync::Arc};

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use log::{debug, warn};

use super::{bitmap_font, canvas::Canvas};
use crate::core::{color::Color, config::FontConfig};

/// A font ready to draw at a fixed size. `Default` is the embedded bitmap
/// font, whose size is fixed.
#[derive(Clone)]
pub enum LoadedFont {
    TrueType { face: Arc<FontVec>, px: f32 },
    Default,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadedFont::TrueType { px, .. } => write!(f, "TrueType({px}px)"),
            LoadedFont::Default => f.write_str("Default"),
        }
    }
}

/// Where text hangs off the anchor point; horizontal is always centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Anchor sits on the baseline (`ms`).
    MiddleBaseline,
    /// Anchor sits on the ascender line (`ma`).
    MiddleTop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: f32,
    /// Distance below the baseline, positive.
    pub descent: f32,
}

/// Candidate paths for `name`: itself, then each search dir joined with it.
fn candidates(name: &str, search_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let direct = PathBuf::from(name);
    let mut out = vec![direct.clone()];
    if direct.is_relative() {
        out.extend(search_dirs.iter().map(|d| d.join(name)));
    }
    out
}

/// Read and parse the first face found for `name`. `None` when no candidate
/// exists or parses.
pub fn load_face(name: &str, search_dirs: &[PathBuf]) -> Option<Arc<FontVec>> {
    for path in candidates(name, search_dirs) {
        let Ok(bytes) = fs::read(&path) else { continue };
        match FontVec::try_from_vec(bytes) {
            Ok(face) => {
                debug!("loaded font {}", path.display());
                return Some(Arc::new(face));
            }
            Err(e) => debug!("font {} unreadable: {e}", path.display()),
        }
    }
    None
}

/// Resolve `name` at `px` pixels, or the built-in font when it cannot be loaded.
pub fn load_font(name: &str, search_dirs: &[PathBuf], px: f32) -> LoadedFont {
    match load_face(name, search_dirs) {
        Some(face) => LoadedFont::TrueType { face, px },
        None => {
            warn!("font {name:?} not found; using built-in default font");
            LoadedFont::Default
        }
    }
}

impl LoadedFont {
    pub fn is_default(&self) -> bool {
        matches!(self, LoadedFont::Default)
    }

    /// Same face at another size; the built-in font ignores `px`.
    pub fn at(&self, px: f32) -> LoadedFont {
        match self {
            LoadedFont::TrueType { face, .. } => LoadedFont::TrueType { face: Arc::clone(face), px },
            LoadedFont::Default => LoadedFont::Default,
        }
    }

    /// Scale so that one em equals `px` pixels (point sizes at 72 dpi).
    fn scale(face: &FontVec, px: f32) -> PxScale {
        let upem = face.units_per_em().unwrap_or(1000.0);
        PxScale::from(px * face.height_unscaled() / upem)
    }

    pub fn measure(&self, text: &str) -> TextMetrics {
        match self {
            LoadedFont::TrueType { face, px } => {
                let scaled = face.as_scaled(Self::scale(face, *px));
                let mut width = 0.0;
                let mut prev: Option<GlyphId> = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(p) = prev { width += scaled.kern(p, id); }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                TextMetrics { width, ascent: scaled.ascent(), descent: -scaled.descent() }
            }
            LoadedFont::Default => TextMetrics {
                width: bitmap_font::text_width(text) as f32,
                ascent: (bitmap_font::GLYPH_H * bitmap_font::SCALE) as f32,
                descent: 0.0,
            },
        }
    }

    /// Draw `text` horizontally centered on `x`, vertically placed per `anchor`.
    pub fn draw(&self, canvas: &mut Canvas, text: &str, x: f32, y: f32, anchor: Anchor, color: Color) {
        let m = self.measure(text);
        let left = x - m.width / 2.0;
        let baseline = match anchor {
            Anchor::MiddleBaseline => y,
            Anchor::MiddleTop => y + m.ascent,
        };
        match self {
            LoadedFont::TrueType { face, px } => draw_outlined(canvas, face, Self::scale(face, *px), text, left, baseline, color),
            LoadedFont::Default => draw_bitmap(canvas, text, left.round() as i32, baseline.round() as i32, color),
        }
    }
}

fn draw_outlined(canvas: &mut Canvas, face: &FontVec, scale: PxScale, text: &str, left: f32, baseline: f32, color: Color) {
    let scaled = face.as_scaled(scale);
    let mut caret = left;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev { caret += scaled.kern(p, id); }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);
        if let Some(outlined) = face.outline_glyph(glyph) {
            let bb = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                canvas.blend(bb.min.x as i32 + gx as i32, bb.min.y as i32 + gy as i32, color, coverage);
            });
        }
    }
}

fn draw_bitmap(canvas: &mut Canvas, text: &str, left: i32, baseline: i32, color: Color) {
    let s = bitmap_font::SCALE as i32;
    let top = baseline - (bitmap_font::GLYPH_H as i32) * s;
    for (i, c) in text.chars().enumerate() {
        let ox = left + i as i32 * bitmap_font::ADVANCE as i32 * s;
        bitmap_font::for_each_pixel(c, |col, row| {
            for dy in 0..s {
                for dx in 0..s {
                    canvas.blend(ox + col as i32 * s + dx, top + row as i32 * s + dy, color, 1.0);
                }
            }
        });
    }
}

/// The four text roles the renderer uses, loaded once per run.
#[derive(Debug, Clone)]
pub struct FontBook {
    pub title: LoadedFont,
    pub label: LoadedFont,
    pub caption: LoadedFont,
    pub small: LoadedFont,
}

impl FontBook {
    pub fn load(cfg: &FontConfig) -> Self {
        let title = load_font(&cfg.family, &cfg.search_dirs, cfg.title_px);
        Self {
            label: title.at(cfg.label_px),
            caption: title.at(cfg.caption_px),
            small: title.at(cfg.small_px),
            title,
        }
    }

    pub fn builtin() -> Self {
        Self { title: LoadedFont::Default, label: LoadedFont::Default, caption: LoadedFont::Default, small: LoadedFont::Default }
    }

    pub fn uses_default(&self) -> bool {
        self.title.is_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_falls_back_to_default() {
        let font = load_font("definitely-not-a-font.ttf", &[PathBuf::from("/nonexistent")], 20.0);
        assert!(font.is_default());
    }

    #[test]
    fn non_font_bytes_fall_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("junk.ttf"), b"not a font").unwrap();
        let font = load_font("junk.ttf", &[dir.path().to_path_buf()], 20.0);
        assert!(font.is_default());
    }

    #[test]
    fn default_font_draws_centered_on_baseline() {
        let mut canvas = Canvas::rgb(200, 60, Color::WHITE);
        LoadedFont::Default.draw(&mut canvas, "HI", 100.0, 40.0, Anchor::MiddleBaseline, Color::BLACK);
        let (mut min_x, mut max_x, mut max_y) = (u32::MAX, 0, 0);
        for y in 0..60 {
            for x in 0..200 {
                if canvas.pixel(x, y) == Some(Color::BLACK) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }
        assert_eq!(max_y, 39, "glyphs sit directly on the baseline");
        let mid = (min_x + max_x + 1) as f32 / 2.0;
        assert!((mid - 100.0).abs() <= 1.0, "text centered, got {mid}");
    }

    #[test]
    fn middle_top_hangs_below_anchor() {
        let mut canvas = Canvas::rgb(100, 60, Color::WHITE);
        LoadedFont::Default.draw(&mut canvas, "T", 50.0, 10.0, Anchor::MiddleTop, Color::BLACK);
        let first_row = (0..60).find(|&y| (0..100).any(|x| canvas.pixel(x, y) == Some(Color::BLACK)));
        assert_eq!(first_row, Some(10));
    }

    #[test]
    fn book_falls_back_when_family_is_missing() {
        let cfg = FontConfig { family: "no-such-face.ttf".into(), search_dirs: vec![], ..Default::default() };
        let book = FontBook::load(&cfg);
        assert!(book.uses_default());
        assert!(book.label.is_default() && book.caption.is_default() && book.small.is_default());
    }

    /// Any TrueType face installed on the machine; `GEM_TEST_FONT` wins.
    fn system_face() -> Option<LoadedFont> {
        let known = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
            "/Library/Fonts/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        std::env::var("GEM_TEST_FONT")
            .ok()
            .into_iter()
            .chain(known.iter().map(|s| s.to_string()))
            .map(|name| load_font(&name, &[], 20.0))
            .find(|f| !f.is_default())
    }

    #[test]
    fn truetype_text_is_em_scaled_and_centered() {
        let Some(font) = system_face() else {
            eprintln!("no TrueType face available; skipping");
            return;
        };
        let mut canvas = Canvas::rgb(200, 80, Color::WHITE);
        font.draw(&mut canvas, "HI", 100.0, 50.0, Anchor::MiddleBaseline, Color::BLACK);
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (u32::MAX, 0, u32::MAX, 0);
        for y in 0..80 {
            for x in 0..200 {
                if canvas.pixel(x, y).is_some_and(|c| c.r < 128) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        assert!(min_x <= max_x, "nothing drawn");
        assert!((48..=50).contains(&max_y), "glyphs rest on the baseline, got {max_y}");
        let mid = (min_x + max_x + 1) as f32 / 2.0;
        assert!((mid - 100.0).abs() <= 3.0, "text centered, got {mid}");
        // cap height of common sans faces is 0.65..0.8 em
        let cap = (max_y + 1 - min_y) as f32;
        assert!((11.0..=17.0).contains(&cap), "cap height {cap} for a 20px em");
        let m = font.measure("HI");
        assert!(m.ascent > cap && m.width > 0.0);
        assert!(font.at(40.0).measure("HI").width > m.width * 1.8);
    }

    #[test]
    fn builtin_book_is_all_default() {
        let book = FontBook::builtin();
        assert!(book.uses_default());
        assert!(book.small.is_default());
    }
}
