use crate::annotations::point::Point;
use crate::render::surface::{DrawingSurface, Rect, TextMetrics};
use image::{Rgb, RgbaImage};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Resize(u32, u32),
    Clear,
    DrawImage(u32, u32),
    Fill { path: Vec<Point>, color: Rgb<u8>, opacity: f32 },
    Stroke { path: Vec<Point>, color: Rgb<u8>, opacity: f32, line_width: f32 },
    RoundedRect { rect: Rect, radius: f32, color: Rgb<u8>, opacity: f32 },
    Text { text: String, x: f32, y: f32, font_size: f32, color: Rgb<u8> },
}

/// Records every call. Text is measured as 0.5 em per char and 1 em tall.
#[derive(Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn fills(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Fill { .. })).collect()
    }

    pub fn strokes(&self) -> Vec<&Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Stroke { .. })).collect()
    }

    pub fn labels(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::RoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.calls.push(Call::Resize(width, height));
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn draw_image(&mut self, image: &RgbaImage) {
        self.calls.push(Call::DrawImage(image.width(), image.height()));
    }

    fn fill_path(&mut self, path: &[Point], color: Rgb<u8>, opacity: f32) {
        self.calls.push(Call::Fill { path: path.to_vec(), color, opacity });
    }

    fn stroke_path(&mut self, path: &[Point], color: Rgb<u8>, opacity: f32, line_width: f32) {
        self.calls.push(Call::Stroke { path: path.to_vec(), color, opacity, line_width });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Rgb<u8>, opacity: f32) {
        self.calls.push(Call::RoundedRect { rect, radius, color, opacity });
    }

    fn measure_text(&self, text: &str, font_size: f32) -> TextMetrics {
        TextMetrics { width: text.chars().count() as f32 * font_size * 0.5, height: font_size }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgb<u8>) {
        self.calls.push(Call::Text { text: text.to_string(), x, y, font_size, color });
    }
}
