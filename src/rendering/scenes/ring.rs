use super::{bottom_label, center, watermark};
use crate::rendering::{
    canvas::Canvas,
    renderer::{RenderRequest, Renderer},
    shapes::{fill_and_stroke, stroke, Ellipse},
};

/// Band circle of radius w/4, stone raised by half that radius.
pub fn paint(r: &Renderer, req: &RenderRequest) -> Canvas {
    let mut canvas = Canvas::rgb(req.width, req.height, r.style.background);
    let (cx, cy) = center(req);
    let size = req.width as i32;
    let band_width = size / 10;
    let outer_radius = size / 4;
    stroke(&mut canvas, &Ellipse::circle(cx, cy, outer_radius), req.primary, band_width as f32);

    let stone_radius = size / 8;
    let stone = Ellipse::circle(cx, cy - outer_radius / 2, stone_radius);
    let stone_color = req.accent.unwrap_or(r.style.stone);
    fill_and_stroke(&mut canvas, &stone, stone_color, req.primary, (band_width / 4) as f32);

    bottom_label(&mut canvas, &r.fonts.label, req, r.style.label);
    watermark(&mut canvas, &r.fonts.label, &r.style.watermark_text, req, r.style.watermark);
    canvas
}
