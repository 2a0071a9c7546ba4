use crate::annotations::detection::Detection;
use crate::annotations::point::Point;
use crate::image_utils::decode::DecodedImage;
use crate::layout::fit_box::{FitBox, FitError};
use crate::render::palette::class_color;
use crate::render::style::OverlayStyle;
use crate::render::surface::{DrawingSurface, Rect, TextMetrics};
use log::{debug, warn};

const ELLIPSIS: char = '\u{2026}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    Drawn,
    /// No decoded image, or one without dimensions. The surface was cleared.
    NotReady,
    /// The container reported a non-positive width or height budget. The surface was cleared.
    InvalidLayout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderReport {
    pub status: RenderStatus,
    pub drawn: usize,
    pub skipped: usize,
}

impl RenderReport {
    fn empty(status: RenderStatus) -> Self {
        RenderReport { status, drawn: 0, skipped: 0 }
    }
}

/// Draws `image` fitted into `container_width` x `max_height`, then every detection on top in
/// list order.
///
/// The surface is resized to the fitted dimensions and fully redrawn; nothing carries over from
/// a previous call. `selected` is matched by identity, so it must point into `detections`.
/// Callers redraw whenever the image, detections, selection or container size change.
pub fn render<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    image: Option<&DecodedImage>,
    detections: &[Detection],
    selected: Option<&Detection>,
    container_width: f32,
    max_height: f32,
    style: &OverlayStyle,
) -> RenderReport {
    let Some(image) = image else {
        surface.clear();
        return RenderReport::empty(RenderStatus::NotReady);
    };
    let fit = match FitBox::compute(
        image.natural_width() as f32,
        image.natural_height() as f32,
        max_height,
        container_width,
    ) {
        Ok(fit) => fit,
        Err(err @ FitError::NotReady { .. }) => {
            debug!("skipping overlay for {}: {err}", image.reference.url());
            surface.clear();
            return RenderReport::empty(RenderStatus::NotReady);
        }
        Err(err @ FitError::InvalidConstraint { .. }) => {
            warn!("skipping overlay for {}: {err}", image.reference.url());
            surface.clear();
            return RenderReport::empty(RenderStatus::InvalidLayout);
        }
    };

    let (width, height) = fit.surface_size();
    surface.resize(width, height);
    surface.clear();
    surface.draw_image(&image.pixels);

    let mut report = RenderReport::empty(RenderStatus::Drawn);
    for detection in detections {
        let is_selected = selected.is_some_and(|s| std::ptr::eq(s, detection));
        if draw_detection(surface, detection, is_selected, &fit, style) {
            report.drawn += 1;
        } else {
            debug!(
                "skipping detection '{}' with {} usable vertices",
                detection.class_id,
                detection.polygon.vertices().len()
            );
            report.skipped += 1;
        }
    }
    report
}

fn draw_detection<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    detection: &Detection,
    selected: bool,
    fit: &FitBox,
    style: &OverlayStyle,
) -> bool {
    if !detection.polygon.is_drawable() {
        return false;
    }
    let Some(bbox) = detection.polygon.bounding_box() else {
        return false;
    };
    let color = class_color(&detection.class_id);
    let path = detection.polygon.scaled(fit.scale_x, fit.scale_y);

    surface.fill_path(&path, color, style.fill_opacity.pick(selected));
    surface.stroke_path(
        &path,
        color,
        style.stroke_opacity.pick(selected),
        style.stroke_width_factor.pick(selected) * fit.uniform_scale,
    );

    let scale = fit.uniform_scale;
    let font_size = style.font_size(scale);
    let padding = style.padding(scale);
    let margin = style.margin(scale);
    let surface_width = surface.width() as f32;
    let max_text_width = surface_width - 2.0 * margin - 2.0 * padding;
    let (text, metrics) = fit_label_text(surface, &detection.class_id, font_size, max_text_width);
    let offset = style.anchor_offset(scale);
    let anchor = fit.to_display(bbox.min_corner());
    let label = place_label(
        Point::new(anchor.x + offset, anchor.y + offset),
        metrics.width + 2.0 * padding,
        metrics.height + 2.0 * padding,
        surface_width,
        surface.height() as f32,
        margin,
    );

    surface.fill_rounded_rect(
        label,
        style.corner_radius(scale),
        color,
        style.label_opacity.pick(selected),
    );
    surface.fill_text(
        &text,
        label.x + padding,
        label.y + (label.height - metrics.height) / 2.0,
        font_size,
        style.text_color(),
    );
    true
}

/// Shortens `text` to a prefix plus an ellipsis until it measures at most `max_width`.
///
/// Gives up at the bare ellipsis, which is returned even when it is still too wide.
fn fit_label_text<S: DrawingSurface + ?Sized>(
    surface: &S,
    text: &str,
    font_size: f32,
    max_width: f32,
) -> (String, TextMetrics) {
    let metrics = surface.measure_text(text, font_size);
    if metrics.width <= max_width {
        return (text.to_string(), metrics);
    }
    let chars: Vec<char> = text.chars().collect();
    let mut keep = chars.len();
    loop {
        keep = keep.saturating_sub(1);
        let shortened: String = chars[..keep].iter().chain(std::iter::once(&ELLIPSIS)).collect();
        let metrics = surface.measure_text(&shortened, font_size);
        if metrics.width <= max_width || keep == 0 {
            debug!("label '{text}' shortened to '{shortened}' to fit {max_width}");
            return (shortened, metrics);
        }
    }
}

/// Positions a label box at `anchor`, pulled back inside the surface when it would overflow.
///
/// Overflow on the right or bottom shifts the box back by the overflow plus `margin`. A box that
/// then starts before the surface origin is pinned at `margin`; a box larger than the surface
/// minus its margins therefore still overflows on the far side. `render` keeps labels narrow
/// enough by shortening their text, so only a font taller than the surface can overflow.
pub fn place_label(
    anchor: Point,
    width: f32,
    height: f32,
    surface_width: f32,
    surface_height: f32,
    margin: f32,
) -> Rect {
    let mut label = Rect { x: anchor.x, y: anchor.y, width, height };
    if label.right() > surface_width {
        label.x -= label.right() - surface_width + margin;
    }
    if label.bottom() > surface_height {
        label.y -= label.bottom() - surface_height + margin;
    }
    if label.x < 0.0 {
        label.x = margin;
    }
    if label.y < 0.0 {
        label.y = margin;
    }
    label
}
