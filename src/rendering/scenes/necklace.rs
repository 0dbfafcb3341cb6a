use super::{bottom_label, center, watermark};
use crate::rendering::{
    canvas::Canvas,
    renderer::{RenderRequest, Renderer},
    shapes::{fill, fill_and_stroke, Ellipse},
};

/// Half-turn of chain links (one per degree) plus a pendant under the arc.
pub fn paint(r: &Renderer, req: &RenderRequest) -> Canvas {
    let mut canvas = Canvas::rgb(req.width, req.height, r.style.background);
    let (cx, cy) = center(req);
    let size = req.width as i32;
    let link = size / 80;
    let radius = size / 3;
    let lift = radius / 3;

    for deg in 0..180 {
        let angle = (deg as f32).to_radians();
        let x = cx + (radius as f32 * angle.cos()) as i32;
        let y = cy + (radius as f32 * angle.sin()) as i32 - lift;
        fill(&mut canvas, &Ellipse::circle(x, y, link), req.primary);
    }

    let pendant = size / 10;
    let body = Ellipse::from_bbox(cx - pendant, cy + pendant - lift, cx + pendant, cy + 3 * pendant - lift);
    let stone_color = req.accent.unwrap_or(r.style.stone);
    fill_and_stroke(&mut canvas, &body, stone_color, req.primary, (link * 2) as f32);

    bottom_label(&mut canvas, &r.fonts.label, req, r.style.label);
    watermark(&mut canvas, &r.fonts.label, &r.style.watermark_text, req, r.style.watermark);
    canvas
}
