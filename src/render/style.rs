use image::Rgb;
use serde::{Deserialize, Serialize};

/// A pair of values for the unselected and selected state of a detection.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Emphasis {
    pub normal: f32,
    pub selected: f32,
}

impl Emphasis {
    pub fn pick(&self, selected: bool) -> f32 {
        if selected { self.selected } else { self.normal }
    }
}

/// Visual constants of the overlay.
///
/// Factors named `*_factor` are multiplied by the fit-box uniform scale. The clamp margin is a
/// tuning value, not a contract; anything small and positive keeps labels on the surface.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub fill_opacity: Emphasis,
    pub stroke_opacity: Emphasis,
    pub stroke_width_factor: Emphasis,
    pub label_opacity: Emphasis,
    pub label_font_factor: f32,
    pub label_font_min: f32,
    pub label_padding_factor: f32,
    pub label_radius_factor: f32,
    pub label_radius_min: f32,
    pub label_offset_factor: f32,
    pub label_margin_factor: f32,
    pub label_margin_min: f32,
    pub label_text_color: [u8; 3],
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayStyle {
            fill_opacity: Emphasis { normal: 0.25, selected: 0.6 },
            stroke_opacity: Emphasis { normal: 0.7, selected: 0.9 },
            stroke_width_factor: Emphasis { normal: 1.5, selected: 2.5 },
            label_opacity: Emphasis { normal: 0.75, selected: 0.9 },
            label_font_factor: 8.0,
            label_font_min: 10.0,
            label_padding_factor: 3.0,
            label_radius_factor: 5.0,
            label_radius_min: 2.0,
            label_offset_factor: 5.0,
            label_margin_factor: 2.0,
            label_margin_min: 1.0,
            label_text_color: [255, 255, 255],
        }
    }
}

impl OverlayStyle {
    pub fn font_size(&self, uniform_scale: f32) -> f32 {
        (self.label_font_factor * uniform_scale).max(self.label_font_min)
    }

    pub fn padding(&self, uniform_scale: f32) -> f32 {
        self.label_padding_factor * uniform_scale
    }

    pub fn corner_radius(&self, uniform_scale: f32) -> f32 {
        (self.label_radius_factor * uniform_scale).max(self.label_radius_min)
    }

    pub fn anchor_offset(&self, uniform_scale: f32) -> f32 {
        self.label_offset_factor * uniform_scale
    }

    /// Gap kept between a clamped label and the surface edge. Always positive.
    pub fn margin(&self, uniform_scale: f32) -> f32 {
        (self.label_margin_factor * uniform_scale).max(self.label_margin_min)
    }

    pub fn text_color(&self) -> Rgb<u8> {
        Rgb(self.label_text_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_never_below_floor() {
        let style = OverlayStyle::default();
        assert_eq!(style.font_size(0.1), 10.0);
        assert_eq!(style.font_size(2.0), 16.0);
    }

    #[test]
    fn corner_radius_floor() {
        let style = OverlayStyle::default();
        assert_eq!(style.corner_radius(0.2), 2.0);
        assert_eq!(style.corner_radius(1.0), 5.0);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let style: OverlayStyle = serde_yaml::from_str("label_font_min: 12.0\n").unwrap();
        assert_eq!(style.label_font_min, 12.0);
        assert_eq!(style.fill_opacity, OverlayStyle::default().fill_opacity);
    }
}
