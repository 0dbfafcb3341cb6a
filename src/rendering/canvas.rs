use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::core::color::Color;
use crate::core::error::RenderError;

/// Channel layout of the encoded file. Drawing always happens in RGBA;
/// `Rgb` canvases start opaque and drop the alpha channel on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

pub struct Canvas {
    img: RgbaImage,
    mode: ColorMode,
}

impl Canvas {
    /// Opaque canvas filled with `background` (alpha forced to 255).
    pub fn rgb(width: u32, height: u32, background: Color) -> Self {
        let bg = background.with_alpha(255).to_rgba();
        Self { img: RgbaImage::from_pixel(width, height, bg), mode: ColorMode::Rgb }
    }

    /// Fully transparent canvas.
    pub fn rgba(width: u32, height: u32) -> Self {
        Self { img: RgbaImage::from_pixel(width, height, Color::TRANSPARENT.to_rgba()), mode: ColorMode::Rgba }
    }

    pub fn width(&self) -> u32 { self.img.width() }
    pub fn height(&self) -> u32 { self.img.height() }
    pub fn mode(&self) -> ColorMode { self.mode }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width() && y < self.height()).then(|| Color::from(*self.img.get_pixel(x, y)))
    }

    /// Source-over composite of `color` at `coverage` (0..1). Out-of-bounds
    /// coordinates are clipped silently.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() { return; }
        let sa = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 { return; }
        let dst = self.img.get_pixel_mut(x as u32, y as u32);
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 { return; }
        let src = [color.r, color.g, color.b];
        for c in 0..3 {
            let s = src[c] as f32;
            let d = dst[c] as f32;
            let v = (s * sa + d * da * (1.0 - sa)) / out_a;
            dst[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    pub fn into_image(self) -> DynamicImage {
        match self.mode {
            ColorMode::Rgb => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(self.img).into_rgb8()),
            ColorMode::Rgba => DynamicImage::ImageRgba8(self.img),
        }
    }

    /// Encode to `path`, format inferred from the extension. The parent
    /// directory must already exist. JPEG has no alpha, so RGBA canvases are
    /// flattened when saved as `.jpg`.
    pub fn save(self, path: &Path) -> Result<(), RenderError> {
        let format = ImageFormat::from_path(path).map_err(|_| RenderError::UnsupportedFormat(path.to_path_buf()))?;
        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) { return Err(RenderError::UnsupportedFormat(path.to_path_buf())); }
        let mut image = self.into_image();
        if format == ImageFormat::Jpeg && image.color().has_alpha() {
            image = DynamicImage::ImageRgb8(image.into_rgb8());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            // Surface a missing directory as an io error instead of an opaque encoder error.
            fs::metadata(parent).map_err(|source| RenderError::Io { path: parent.to_path_buf(), source })?;
        }
        image.save_with_format(path, format).map_err(|source| RenderError::Encode { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_over_transparent_keeps_source_alpha() {
        let mut c = Canvas::rgba(4, 4);
        c.blend(1, 1, Color::rgba(240, 240, 255, 220), 1.0);
        assert_eq!(c.mode(), ColorMode::Rgba);
        assert_eq!(c.pixel(1, 1), Some(Color::rgba(240, 240, 255, 220)));
        assert_eq!(c.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn blend_half_coverage_mixes_on_opaque() {
        let mut c = Canvas::rgb(2, 2, Color::WHITE);
        c.blend(0, 0, Color::BLACK, 0.5);
        let p = c.pixel(0, 0).unwrap();
        assert!(p.r > 120 && p.r < 135, "got {p}");
        assert_eq!(p.a, 255);
    }

    #[test]
    fn translucent_ink_composites_instead_of_overwriting() {
        // watermark grey over an opaque background
        let mut c = Canvas::rgb(1, 1, Color::WHITE);
        c.blend(0, 0, Color::rgba(200, 200, 200, 128), 1.0);
        assert_eq!(c.pixel(0, 0), Some(Color::rgb(227, 227, 227)));

        // facet white over the translucent stone body
        let mut c = Canvas::rgba(1, 1);
        c.blend(0, 0, Color::rgba(240, 240, 255, 220), 1.0);
        c.blend(0, 0, Color::rgba(255, 255, 255, 128), 1.0);
        assert_eq!(c.pixel(0, 0), Some(Color::rgba(248, 248, 255, 238)));
    }

    #[test]
    fn out_of_bounds_is_clipped() {
        let mut c = Canvas::rgb(2, 2, Color::WHITE);
        c.blend(-1, 0, Color::BLACK, 1.0);
        c.blend(0, 7, Color::BLACK, 1.0);
        assert_eq!(c.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(c.pixel(5, 5), None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = Canvas::rgb(4, 4, Color::WHITE).save(&dir.path().join("x.txt")).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Canvas::rgb(4, 4, Color::WHITE).save(&dir.path().join("nope/x.png")).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
