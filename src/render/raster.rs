use crate::annotations::point::Point;
use crate::error::OverlayError;
use crate::render::surface::{DrawingSurface, Rect, TextMetrics};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut,
    draw_text_mut, text_size,
};
use imageproc::point::Point as PixelPoint;
use itertools::Itertools;
use std::path::Path;

const COVERED: Luma<u8> = Luma([255]);

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// The DejaVu Sans face shipped with the crate, used when no other font is configured.
pub fn bundled_font() -> Result<FontArc, OverlayError> {
    FontArc::try_from_slice(BUNDLED_FONT).map_err(OverlayError::BundledFont)
}

/// Reads a TrueType or OpenType font for label text.
pub fn load_font(filepath: &Path) -> Result<FontArc, OverlayError> {
    let bytes = std::fs::read(filepath).map_err(|source| OverlayError::Io {
        path: filepath.to_path_buf(),
        source,
    })?;
    FontArc::try_from_vec(bytes).map_err(|_| OverlayError::Font { path: filepath.to_path_buf() })
}

/// A drawing surface backed by an RGBA pixel buffer.
///
/// Every shape is first rasterized into a coverage mask and then composited once, so
/// self-overlapping strokes and joins do not stack their opacity.
pub struct RasterSurface {
    image: RgbaImage,
    font: FontArc,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, font: FontArc) -> Self {
        RasterSurface { image: RgbaImage::new(width, height), font }
    }

    /// A surface that labels with [`bundled_font`].
    pub fn with_bundled_font(width: u32, height: u32) -> Result<Self, OverlayError> {
        Ok(RasterSurface::new(width, height, bundled_font()?))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn blank_mask(&self) -> GrayImage {
        GrayImage::new(self.image.width(), self.image.height())
    }

    fn composite(&mut self, mask: &GrayImage, color: Rgb<u8>, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity == 0.0 {
            return;
        }
        for (dst, coverage) in self.image.pixels_mut().zip(mask.pixels()) {
            if coverage[0] == 0 {
                continue;
            }
            let alpha = opacity * f32::from(coverage[0]) / 255.0;
            *dst = blend(*dst, color, alpha);
        }
    }
}

/// Source-over blend of an opaque color at `alpha` onto `dst`.
fn blend(dst: Rgba<u8>, color: Rgb<u8>, alpha: f32) -> Rgba<u8> {
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        let src = f32::from(color[i]) * alpha;
        let below = f32::from(dst[i]) * dst_alpha * (1.0 - alpha);
        ((src + below) / out_alpha).round().clamp(0.0, 255.0) as u8
    };
    Rgba([channel(0), channel(1), channel(2), (out_alpha * 255.0).round() as u8])
}

/// Rounds a path to pixel coordinates in the shape `draw_polygon_mut` accepts: no repeated
/// neighbours and a last vertex distinct from the first. Returns `None` when fewer than three
/// pixels remain.
fn pixel_ring(path: &[Point]) -> Option<Vec<PixelPoint<i32>>> {
    let mut ring: Vec<PixelPoint<i32>> = path
        .iter()
        .map(|p| PixelPoint::new(p.x.round() as i32, p.y.round() as i32))
        .dedup()
        .collect();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    (ring.len() >= 3).then_some(ring)
}

fn fill_ring(mask: &mut GrayImage, path: &[Point]) {
    if let Some(ring) = pixel_ring(path) {
        draw_polygon_mut(mask, &ring, COVERED);
    }
}

impl DrawingSurface for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn draw_image(&mut self, image: &RgbaImage) {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let resized = imageops::resize(image, width, height, FilterType::Triangle);
        imageops::overlay(&mut self.image, &resized, 0, 0);
    }

    fn fill_path(&mut self, path: &[Point], color: Rgb<u8>, opacity: f32) {
        let mut mask = self.blank_mask();
        fill_ring(&mut mask, path);
        self.composite(&mask, color, opacity);
    }

    fn stroke_path(&mut self, path: &[Point], color: Rgb<u8>, opacity: f32, line_width: f32) {
        if path.len() < 2 {
            return;
        }
        let mut mask = self.blank_mask();
        let half = line_width / 2.0;
        for (a, b) in path.iter().circular_tuple_windows() {
            draw_line_segment_mut(&mut mask, (a.x, a.y), (b.x, b.y), COVERED);
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let length = (dx * dx + dy * dy).sqrt();
            if half < 1.0 || length < f32::EPSILON {
                continue;
            }
            let (nx, ny) = (-dy / length * half, dx / length * half);
            fill_ring(
                &mut mask,
                &[
                    Point::new(a.x + nx, a.y + ny),
                    Point::new(b.x + nx, b.y + ny),
                    Point::new(b.x - nx, b.y - ny),
                    Point::new(a.x - nx, a.y - ny),
                ],
            );
        }
        if half >= 1.0 {
            let radius = half.round() as i32;
            for p in path {
                let center = (p.x.round() as i32, p.y.round() as i32);
                draw_filled_circle_mut(&mut mask, center, radius, COVERED);
            }
        }
        self.composite(&mask, color, opacity);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgb<u8>, opacity: f32) {
        let x = rect.x.round() as i32;
        let y = rect.y.round() as i32;
        let w = rect.width.round() as i32;
        let h = rect.height.round() as i32;
        if w <= 0 || h <= 0 {
            return;
        }
        let r = (radius.round() as i32).clamp(0, w.min(h) / 2);
        let mut mask = self.blank_mask();
        if w - 2 * r > 0 {
            draw_filled_rect_mut(
                &mut mask,
                imageproc::rect::Rect::at(x + r, y).of_size((w - 2 * r) as u32, h as u32),
                COVERED,
            );
        }
        if h - 2 * r > 0 {
            draw_filled_rect_mut(
                &mut mask,
                imageproc::rect::Rect::at(x, y + r).of_size(w as u32, (h - 2 * r) as u32),
                COVERED,
            );
        }
        if r > 0 {
            let (left, top) = (x + r, y + r);
            let (right, bottom) = (x + w - 1 - r, y + h - 1 - r);
            for center in [(left, top), (right, top), (left, bottom), (right, bottom)] {
                draw_filled_circle_mut(&mut mask, center, r, COVERED);
            }
        }
        self.composite(&mask, color, opacity);
    }

    fn measure_text(&self, text: &str, font_size: f32) -> TextMetrics {
        let scale = PxScale::from(font_size);
        let (width, _) = text_size(scale, &self.font, text);
        TextMetrics { width: width as f32, height: self.font.as_scaled(scale).height() }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgb<u8>) {
        if text.is_empty() {
            return;
        }
        let mut mask = self.blank_mask();
        draw_text_mut(
            &mut mask,
            COVERED,
            x.round() as i32,
            y.round() as i32,
            PxScale::from(font_size),
            &self.font,
            text,
        );
        self.composite(&mask, color, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn surface(width: u32, height: u32) -> RasterSurface {
        RasterSurface::with_bundled_font(width, height).unwrap()
    }

    fn square(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    #[test]
    fn fill_blends_at_opacity() {
        let mut surface = surface(20, 20);
        for pixel in surface.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 255]);
        }
        surface.fill_path(&square(2.0, 2.0, 17.0, 17.0), RED, 0.25);
        assert_eq!(surface.image().get_pixel(10, 10), &Rgba([64, 0, 0, 255]));
        assert_eq!(surface.image().get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn degenerate_fill_draws_nothing() {
        let mut surface = surface(20, 20);
        surface.fill_path(&square(5.0, 5.0, 5.2, 5.2), RED, 1.0);
        assert!(surface.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn stroke_leaves_interior_untouched() {
        let mut surface = surface(40, 40);
        surface.stroke_path(&square(5.0, 5.0, 35.0, 35.0), RED, 1.0, 3.0);
        assert_eq!(surface.image().get_pixel(5, 20)[0], 255);
        assert_eq!(surface.image().get_pixel(20, 20)[3], 0);
    }

    #[test]
    fn rounded_rect_cuts_corners() {
        let mut surface = surface(40, 40);
        surface.fill_rounded_rect(
            Rect { x: 0.0, y: 0.0, width: 30.0, height: 20.0 },
            6.0,
            RED,
            1.0,
        );
        assert_eq!(surface.image().get_pixel(0, 0)[3], 0);
        assert_eq!(surface.image().get_pixel(15, 10)[3], 255);
        assert_eq!(surface.image().get_pixel(15, 0)[3], 255);
        assert_eq!(surface.image().get_pixel(35, 10)[3], 0);
    }

    #[test]
    fn draw_image_stretches_to_surface() {
        let source = RgbaImage::from_pixel(4, 2, Rgba([0, 255, 0, 255]));
        let mut surface = surface(8, 4);
        surface.draw_image(&source);
        assert!(surface.image().pixels().all(|p| p[0] <= 1 && p[1] >= 254 && p[3] >= 254));
    }

    #[test]
    fn resize_and_clear() {
        let mut surface = surface(4, 4);
        surface.fill_path(&square(0.0, 0.0, 3.0, 3.0), RED, 1.0);
        surface.resize(6, 3);
        assert_eq!((surface.width(), surface.height()), (6, 3));
        surface.fill_path(&square(0.0, 0.0, 5.0, 2.0), RED, 1.0);
        surface.clear();
        assert!(surface.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn bundled_font_metrics_grow_with_text_and_size() {
        let surface = surface(10, 10);
        let short = surface.measure_text("aphid", 10.0);
        let long = surface.measure_text("aphid colony", 10.0);
        let large = surface.measure_text("aphid", 20.0);
        assert!(short.width > 0.0 && short.height >= 10.0, "{short:?}");
        assert!(long.width > short.width);
        assert!(large.width > short.width && large.height > short.height);
        assert_eq!(surface.measure_text("", 10.0).width, 0.0);
    }

    #[test]
    fn label_text_is_drawn_inside_its_box() {
        let mut surface = surface(120, 40);
        for pixel in surface.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 255]);
        }
        let padding = 3.0;
        let metrics = surface.measure_text("Blight", 14.0);
        let label = Rect {
            x: 4.0,
            y: 4.0,
            width: metrics.width + 2.0 * padding,
            height: metrics.height + 2.0 * padding,
        };
        surface.fill_rounded_rect(label, 3.0, RED, 1.0);
        surface.fill_text("Blight", label.x + padding, label.y + padding, 14.0, Rgb([255; 3]));

        // red has no green, so any green comes from the white glyphs
        let text_pixels: Vec<(u32, u32)> = surface
            .image()
            .enumerate_pixels()
            .filter(|(_, _, p)| p[1] > 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(text_pixels.iter().any(|&(x, y)| surface.image().get_pixel(x, y)[1] > 200));
        for (x, y) in text_pixels {
            assert!(x as f32 >= label.x && (x as f32) < label.right() + 1.0, "({x}, {y})");
            assert!(y as f32 >= label.y && (y as f32) < label.bottom() + 1.0, "({x}, {y})");
        }
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut surface = surface(10, 10);
        surface.fill_text("", 0.0, 0.0, 10.0, Rgb([255; 3]));
        assert!(surface.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn missing_font_is_io_error() {
        let err = load_font(Path::new("./no/such/font.ttf")).unwrap_err();
        assert!(matches!(err, OverlayError::Io { .. }));
    }
}
