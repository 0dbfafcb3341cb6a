//! Signed-distance shape primitives rasterized with supersampled coverage.
//!
//! Every shape returns a distance in pixels, negative inside. Bounding boxes
//! follow inclusive pixel semantics: `(x0, y0, x1, y1)` covers pixel columns
//! `x0..=x1`, i.e. the continuous span `[x0, x1 + 1)`.
//! Strokes grow inward from the outline, so a stroked shape never exceeds its
//! bounding box.

use super::canvas::Canvas;
use crate::core::color::Color;

/// 2x2 sub-pixel sample grid.
const SAMPLE_OFFSETS: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

pub trait Shape {
    fn signed_distance(&self, x: f32, y: f32) -> f32;
    /// Continuous `(min_x, min_y, max_x, max_y)` enclosing every inside point.
    fn bounds(&self) -> (f32, f32, f32, f32);
}

#[derive(Debug, Clone, Copy)]
pub struct Ellipse { pub cx: f32, pub cy: f32, pub rx: f32, pub ry: f32 }

impl Ellipse {
    pub fn from_bbox(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (w, h) = ((x1 - x0 + 1) as f32, (y1 - y0 + 1) as f32);
        Self { cx: x0 as f32 + w * 0.5, cy: y0 as f32 + h * 0.5, rx: (w * 0.5).max(0.5), ry: (h * 0.5).max(0.5) }
    }
    /// Circle centered on pixel `(cx, cy)` whose bbox spans `cx-r..=cx+r`.
    pub fn circle(cx: i32, cy: i32, r: i32) -> Self {
        Self::from_bbox(cx - r, cy - r, cx + r, cy + r)
    }
}

impl Shape for Ellipse {
    fn signed_distance(&self, x: f32, y: f32) -> f32 {
        // Scaled-circle approximation; exact for circles, close enough for the
        // thin outlines drawn on ovals.
        let nx = (x - self.cx) / self.rx;
        let ny = (y - self.cy) / self.ry;
        ((nx * nx + ny * ny).sqrt() - 1.0) * self.rx.min(self.ry)
    }
    fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.cx - self.rx, self.cy - self.ry, self.cx + self.rx, self.cy + self.ry)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoundedRect { pub cx: f32, pub cy: f32, pub hw: f32, pub hh: f32, pub radius: f32 }

impl RoundedRect {
    pub fn from_bbox(x0: i32, y0: i32, x1: i32, y1: i32, radius: f32) -> Self {
        let (w, h) = ((x1 - x0 + 1) as f32, (y1 - y0 + 1) as f32);
        let (hw, hh) = ((w * 0.5).max(0.5), (h * 0.5).max(0.5));
        Self { cx: x0 as f32 + w * 0.5, cy: y0 as f32 + h * 0.5, hw, hh, radius: radius.clamp(0.0, hw.min(hh)) }
    }
    pub fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::from_bbox(x0, y0, x1, y1, 0.0)
    }
}

impl Shape for RoundedRect {
    fn signed_distance(&self, x: f32, y: f32) -> f32 {
        let qx = (x - self.cx).abs() - (self.hw - self.radius);
        let qy = (y - self.cy).abs() - (self.hh - self.radius);
        let ox = qx.max(0.0);
        let oy = qy.max(0.0);
        (ox * ox + oy * oy).sqrt() + qx.max(qy).min(0.0) - self.radius
    }
    fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.cx - self.hw, self.cy - self.hh, self.cx + self.hw, self.cy + self.hh)
    }
}

/// Line segment between two pixel centers, `width` pixels thick with round caps.
#[derive(Debug, Clone, Copy)]
pub struct Segment { pub ax: f32, pub ay: f32, pub bx: f32, pub by: f32, pub half_width: f32 }

impl Segment {
    pub fn between(a: (i32, i32), b: (i32, i32), width: u32) -> Self {
        Self {
            ax: a.0 as f32 + 0.5,
            ay: a.1 as f32 + 0.5,
            bx: b.0 as f32 + 0.5,
            by: b.1 as f32 + 0.5,
            half_width: (width.max(1) as f32) * 0.5,
        }
    }
}

impl Shape for Segment {
    fn signed_distance(&self, x: f32, y: f32) -> f32 {
        let (vx, vy) = (self.bx - self.ax, self.by - self.ay);
        let (wx, wy) = (x - self.ax, y - self.ay);
        let ll = vx * vx + vy * vy;
        let t = if ll <= 1e-6 { 0.0 } else { ((vx * wx + vy * wy) / ll).clamp(0.0, 1.0) };
        let (dx, dy) = (x - (self.ax + vx * t), y - (self.ay + vy * t));
        (dx * dx + dy * dy).sqrt() - self.half_width
    }
    fn bounds(&self) -> (f32, f32, f32, f32) {
        let hw = self.half_width;
        (self.ax.min(self.bx) - hw, self.ay.min(self.by) - hw, self.ax.max(self.bx) + hw, self.ay.max(self.by) + hw)
    }
}

fn rasterize(canvas: &mut Canvas, shape: &dyn Shape, color: Color, inside: impl Fn(f32) -> bool) {
    let (x0, y0, x1, y1) = shape.bounds();
    let min_x = (x0.floor() as i32 - 1).max(0);
    let min_y = (y0.floor() as i32 - 1).max(0);
    let max_x = (x1.ceil() as i32 + 1).min(canvas.width() as i32 - 1);
    let max_y = (y1.ceil() as i32 + 1).min(canvas.height() as i32 - 1);
    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let hits = SAMPLE_OFFSETS
                .iter()
                .filter(|(ox, oy)| inside(shape.signed_distance(px as f32 + ox, py as f32 + oy)))
                .count();
            if hits > 0 {
                canvas.blend(px, py, color, hits as f32 / SAMPLE_OFFSETS.len() as f32);
            }
        }
    }
}

pub fn fill(canvas: &mut Canvas, shape: &dyn Shape, color: Color) {
    rasterize(canvas, shape, color, |sd| sd <= 0.0);
}

/// Outline of `width` pixels drawn inward from the shape boundary.
pub fn stroke(canvas: &mut Canvas, shape: &dyn Shape, color: Color, width: f32) {
    if width <= 0.0 { return; }
    rasterize(canvas, shape, color, |sd| sd <= 0.0 && sd >= -width);
}

/// Fill then outline, the usual "fill + outline + width" draw call.
pub fn fill_and_stroke(canvas: &mut Canvas, shape: &dyn Shape, fill_color: Color, outline: Color, width: f32) {
    if width > 0.0 {
        rasterize(canvas, shape, fill_color, |sd| sd < -width);
        stroke(canvas, shape, outline, width);
    } else {
        fill(canvas, shape, fill_color);
    }
}
