use super::{center, watermark};
use crate::rendering::{
    canvas::Canvas,
    renderer::{RenderRequest, Renderer},
    shapes::{fill, fill_and_stroke, Ellipse},
    text::Anchor,
};

pub const COLUMNS: usize = 4;

/// Pixel center of inclusion `j` for a stone whose bbox starts at `(left, top)`.
/// Dots fill a 3-wide grid centered on the stone, row by row.
pub fn inclusion_position(left: i32, top: i32, diamond: i32, j: usize) -> (i32, i32) {
    let step = diamond / 6;
    let col = (j % 3) as i32 - 1;
    let row = (j / 3) as i32 - 1;
    (left + diamond / 2 + col * step, top + diamond / 2 + row * step)
}

/// Top-left of cell `i` and its stone diameter; the grid starts one cell down.
pub fn cell_origin(width: u32, i: usize) -> (i32, i32, i32) {
    let block = width as i32 / COLUMNS as i32;
    let x = (i % COLUMNS) as i32 * block;
    let y = (i / COLUMNS) as i32 * block + block;
    (x, y, block)
}

/// Cell `i` shows grade `i` with `i` inclusions.
pub fn paint(r: &Renderer, req: &RenderRequest) -> Canvas {
    let mut canvas = Canvas::rgb(req.width, req.height, r.style.background);
    let ink = req.primary;
    for (i, grade) in r.grades.clarity.iter().enumerate() {
        let (x, y, block) = cell_origin(req.width, i);
        let diamond = block / 2;
        let left = x + block / 4;
        let stone = Ellipse::from_bbox(left, y, left + diamond, y + diamond);
        fill_and_stroke(&mut canvas, &stone, r.style.stone, ink, 1.0);

        let dot = r.style.inclusion_radius;
        for j in 0..i {
            let (dx, dy) = inclusion_position(left, y, diamond, j);
            fill(&mut canvas, &Ellipse::circle(dx, dy, dot), ink);
        }

        r.fonts.small.draw(&mut canvas, grade, (x + block / 2) as f32, (y + diamond + 20) as f32, Anchor::MiddleBaseline, ink);
    }
    let (cx, _) = center(req);
    r.fonts.title.draw(&mut canvas, &req.label, cx as f32, 30.0, Anchor::MiddleBaseline, ink);
    watermark(&mut canvas, &r.fonts.title, &r.style.watermark_text, req, r.style.watermark);
    canvas
}
