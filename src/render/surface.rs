use crate::annotations::point::Point;
use image::{Rgb, RgbaImage};

/// Size of a rendered string, in surface units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

/// An axis-aligned rectangle in surface units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// The 2D drawing operations the overlay renderer needs.
///
/// The renderer owns no surface; hosts pass one in, which lets tests substitute a recorder.
/// Opacities are in [0, 1]. Paths are implicitly closed.
pub trait DrawingSurface {
    fn resize(&mut self, width: u32, height: u32);
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self);
    /// Draws `image` stretched over the whole surface.
    fn draw_image(&mut self, image: &RgbaImage);
    fn fill_path(&mut self, path: &[Point], color: Rgb<u8>, opacity: f32);
    fn stroke_path(&mut self, path: &[Point], color: Rgb<u8>, opacity: f32, line_width: f32);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgb<u8>, opacity: f32);
    fn measure_text(&self, text: &str, font_size: f32) -> TextMetrics;
    /// Draws `text` with its top-left corner at (`x`, `y`).
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgb<u8>);
}
