use std::collections::HashSet;

use gem_placeholders::{rendering::FontBook, Color, PlaceholderConfig, RenderRequest, Renderer, ShapeKind};
use image::GenericImageView;

fn renderer() -> Renderer {
    Renderer::with_fonts(&PlaceholderConfig::default(), FontBook::builtin())
}

#[test]
fn color_chart_has_eight_bands_in_grade_order() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("color-grades.png");
    let req = RenderRequest::new(ShapeKind::ColorChart, (600, 600), Color::BLACK, &out).with_label("Diamond Color Grades");
    renderer().render(&req).unwrap();
    let img = image::open(&out).unwrap();

    // Walk one column right of the labels and watermark, collapsing runs.
    let mut bands: Vec<Color> = Vec::new();
    for y in 0..600 {
        let c = Color::from(img.get_pixel(500, y));
        if c == Color::BLACK {
            continue;
        }
        if bands.last() != Some(&c) {
            bands.push(c);
        }
    }
    let expected: Vec<Color> = PlaceholderConfig::default().grades.color.iter().map(|g| g.color).collect();
    assert_eq!(expected.len(), 8);
    assert_eq!(bands, expected, "bands must run D to K top to bottom");
    let distinct: HashSet<_> = bands.iter().collect();
    assert_eq!(distinct.len(), 8);
}

#[test]
fn color_chart_band_centers_match_literals() {
    let canvas = renderer().paint(&RenderRequest::new(ShapeKind::ColorChart, (600, 600), Color::BLACK, "c.jpg"));
    let grades = PlaceholderConfig::default().grades.color;
    for (i, g) in grades.iter().enumerate() {
        let y = i as u32 * 75 + 37;
        assert_eq!(canvas.pixel(500, y), Some(g.color), "grade {}", g.grade);
    }
    assert_eq!(grades.first().map(|g| g.grade.as_str()), Some("D"));
    assert_eq!(grades.last().map(|g| g.grade.as_str()), Some("K"));
}

/// Connected dark blobs inside `[x0, x1) x [y0, y1)`.
fn count_blobs(canvas: &gem_placeholders::rendering::Canvas, x0: i32, y0: i32, x1: i32, y1: i32) -> usize {
    let dark = |x: i32, y: i32| canvas.pixel(x as u32, y as u32).is_some_and(|c| c.r < 128);
    let mut seen = HashSet::new();
    let mut blobs = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            if !dark(x, y) || seen.contains(&(x, y)) {
                continue;
            }
            blobs += 1;
            let mut stack = vec![(x, y)];
            seen.insert((x, y));
            while let Some((cx, cy)) = stack.pop() {
                for (nx, ny) in [(cx + 1, cy), (cx - 1, cy), (cx, cy + 1), (cx, cy - 1)] {
                    if nx < x0 || ny < y0 || nx >= x1 || ny >= y1 {
                        continue;
                    }
                    if dark(nx, ny) && seen.insert((nx, ny)) {
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }
    blobs
}

#[test]
fn clarity_cell_i_has_i_inclusions() {
    let canvas = renderer().paint(&RenderRequest::new(ShapeKind::ClarityChart, (600, 600), Color::BLACK, "c.jpg").with_label("Diamond Clarity Grades"));
    let block = 150;
    let diamond = block / 2;
    for i in 0..8 {
        let x = (i % 4) * block;
        let y = (i / 4) * block + block;
        let (cx, cy) = (x + block / 4 + diamond / 2, y + diamond / 2);
        // stay well inside the 1px stone outline
        let blobs = count_blobs(&canvas, cx - 20, cy - 20, cx + 21, cy + 21);
        assert_eq!(blobs, i as usize, "cell {i}");
    }
}

#[test]
fn clarity_stones_are_outlined() {
    let canvas = renderer().paint(&RenderRequest::new(ShapeKind::ClarityChart, (600, 600), Color::BLACK, "c.jpg"));
    // left edge of the first stone: bbox starts at x = 37, vertical middle y = 187
    assert_eq!(canvas.pixel(37, 187), Some(Color::BLACK));
    assert_eq!(canvas.pixel(75, 187), Some(Color::rgb(240, 240, 255)));
}
