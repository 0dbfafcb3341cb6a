use super::center;
use crate::rendering::{
    canvas::Canvas,
    renderer::{RenderRequest, Renderer},
    shapes::{stroke, RoundedRect},
    text::Anchor,
};

/// Plain grey card: inset border, the label, and a hint to supply real art.
pub fn paint(r: &Renderer, req: &RenderRequest) -> Canvas {
    let style = &r.style.card;
    let mut canvas = Canvas::rgb(req.width, req.height, style.background);
    let inset = style.border_width as i32 / 2;
    let (w, h) = (req.width as i32, req.height as i32);
    if w > 2 * inset && h > 2 * inset {
        let frame = RoundedRect::rect(inset, inset, w - inset, h - inset);
        stroke(&mut canvas, &frame, style.border, style.border_width as f32);
    }
    let (cx, cy) = center(req);
    r.fonts.title.draw(&mut canvas, &req.label, cx as f32, (cy - 15) as f32, Anchor::MiddleTop, req.primary);
    r.fonts.caption.draw(&mut canvas, &style.instruction, cx as f32, (cy + 20) as f32, Anchor::MiddleTop, req.primary);
    canvas
}
