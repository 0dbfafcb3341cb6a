use super::{bottom_label, center, watermark};
use crate::rendering::{
    canvas::Canvas,
    renderer::{DiamondCut, RenderRequest, Renderer},
    shapes::{fill, fill_and_stroke, Ellipse, RoundedRect, Segment, Shape},
};

const FACETS: usize = 8;

fn outline(cut: DiamondCut, req: &RenderRequest) -> Box<dyn Shape> {
    let (cx, cy) = center(req);
    let (w, h) = (req.width as i32, req.height as i32);
    match cut {
        DiamondCut::Round => Box::new(Ellipse::circle(cx, cy, w / 3)),
        DiamondCut::Princess => {
            let half = w / 3 / 2;
            Box::new(RoundedRect::rect(cx - half, cy - half, cx + half, cy + half))
        }
        DiamondCut::Cushion => {
            let radius = w / 6;
            Box::new(RoundedRect::from_bbox(cx - radius * 2, cy - radius * 2, cx + radius * 2, cy + radius * 2, radius as f32))
        }
        DiamondCut::Oval => Box::new(Ellipse::from_bbox(cx - w / 3, cy - h / 4, cx + w / 3, cy + h / 4)),
        DiamondCut::Emerald => {
            let (ew, eh) = (w / 3, h / 2);
            Box::new(RoundedRect::from_bbox(cx - ew / 2, cy - eh / 2, cx + ew / 2, cy + eh / 2, (ew / 10) as f32))
        }
    }
}

/// Transparent RGBA canvas: translucent stone body, white rim, radial facets.
pub fn paint(r: &Renderer, req: &RenderRequest, cut: DiamondCut) -> Canvas {
    let style = &r.style.diamond;
    let mut canvas = Canvas::rgba(req.width, req.height);
    let body = outline(cut, req);
    fill_and_stroke(&mut canvas, body.as_ref(), req.primary, style.outline, style.outline_width);

    let (cx, cy) = center(req);
    let line_length = (req.width as i32 / 4) as f32;
    for i in 0..FACETS {
        let angle = ((i * 45) as f32).to_radians();
        let (c, s) = (angle.cos(), angle.sin());
        let from = (cx + (line_length * 0.2 * c) as i32, cy + (line_length * 0.2 * s) as i32);
        let to = (cx + (line_length * c) as i32, cy + (line_length * s) as i32);
        fill(&mut canvas, &Segment::between(from, to, 1), style.facet);
    }

    bottom_label(&mut canvas, &r.fonts.label, req, style.label);
    watermark(&mut canvas, &r.fonts.label, &r.style.watermark_text, req, style.watermark);
    canvas
}
