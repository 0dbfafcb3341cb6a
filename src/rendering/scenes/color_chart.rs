use super::{center, watermark};
use crate::rendering::{
    canvas::Canvas,
    renderer::{RenderRequest, Renderer},
    shapes::{fill_and_stroke, RoundedRect},
    text::Anchor,
};

const LEFT_MARGIN: i32 = 50;
const LABEL_X: f32 = 25.0;

/// One full-height-share swatch per grade, top to bottom in table order.
pub fn paint(r: &Renderer, req: &RenderRequest) -> Canvas {
    let mut canvas = Canvas::rgb(req.width, req.height, r.style.background);
    let grades = &r.grades.color;
    let ink = req.primary;
    if !grades.is_empty() {
        let block_height = req.height as i32 / grades.len() as i32;
        let block_width = req.width as i32 - 100;
        for (i, grade) in grades.iter().enumerate() {
            let top = i as i32 * block_height;
            let swatch = RoundedRect::rect(LEFT_MARGIN, top, LEFT_MARGIN + block_width, top + block_height);
            fill_and_stroke(&mut canvas, &swatch, grade.color, ink, 1.0);
            r.fonts.label.draw(&mut canvas, &grade.grade, LABEL_X, (top + block_height / 2) as f32, Anchor::MiddleBaseline, ink);
        }
    }
    let (cx, _) = center(req);
    r.fonts.title.draw(&mut canvas, &req.label, cx as f32, 20.0, Anchor::MiddleBaseline, ink);
    watermark(&mut canvas, &r.fonts.title, &r.style.watermark_text, req, r.style.watermark);
    canvas
}
