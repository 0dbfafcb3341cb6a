//! One painter per shape kind. Each takes the shared renderer state and a
//! request and returns a finished canvas. Layout follows fixed proportions of
//! the canvas width/height using integer (floor) arithmetic.

pub mod card;
pub mod clarity_chart;
pub mod color_chart;
pub mod diamond;
pub mod necklace;
pub mod ring;

use super::{
    canvas::Canvas,
    renderer::RenderRequest,
    text::{Anchor, LoadedFont},
};
use crate::core::color::Color;

fn center(req: &RenderRequest) -> (i32, i32) {
    (req.width as i32 / 2, req.height as i32 / 2)
}

/// Caption 30px above the bottom edge, baseline-centered.
fn bottom_label(canvas: &mut Canvas, font: &LoadedFont, req: &RenderRequest, color: Color) {
    let (cx, _) = center(req);
    font.draw(canvas, &req.label, cx as f32, (req.height as i32 - 30) as f32, Anchor::MiddleBaseline, color);
}

fn watermark(canvas: &mut Canvas, font: &LoadedFont, text: &str, req: &RenderRequest, color: Color) {
    let (cx, cy) = center(req);
    font.draw(canvas, text, cx as f32, cy as f32, Anchor::MiddleBaseline, color);
}
