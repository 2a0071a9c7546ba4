use crate::annotations::detection::Detection;
use crate::annotations::point::Point;
use crate::image_utils::decode::{DecodeOutcome, DecodeTicket, DecodedImage, ImageReference};
use crate::layout::fit_box::FitBox;
use crate::render::overlay::{RenderReport, render};
use crate::render::style::OverlayStyle;
use crate::render::surface::DrawingSurface;
use log::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStatus {
    Committed,
    /// The decode belonged to the current image but failed; the image is treated as absent.
    Failed,
    /// The image was swapped or cleared after the decode was requested.
    Stale,
}

/// Owns the renderer inputs for one overlay and tracks when they need a redraw.
///
/// Every setter marks the view dirty; hosts call [`OverlayView::redraw`] (or
/// [`OverlayView::redraw_if_needed`] to coalesce bursts such as resize storms) after changes.
/// Image decoding happens outside the view: [`OverlayView::set_image`] hands out a ticket and
/// only the ticket of the latest request can commit through [`OverlayView::complete_decode`].
pub struct OverlayView {
    style: OverlayStyle,
    container_width: f32,
    max_height: f32,
    generation: u64,
    requested: Option<ImageReference>,
    image: Option<DecodedImage>,
    detections: Vec<Detection>,
    selected: Option<usize>,
    dirty: bool,
}

impl OverlayView {
    pub fn new(container_width: f32, max_height: f32, style: OverlayStyle) -> Self {
        OverlayView {
            style,
            container_width,
            max_height,
            generation: 0,
            requested: None,
            image: None,
            detections: Vec::new(),
            selected: None,
            dirty: true,
        }
    }

    /// Starts showing a new image. Detections and selection of the previous image are dropped.
    pub fn set_image(&mut self, reference: ImageReference) -> DecodeTicket {
        self.generation += 1;
        info!("requesting image {} (generation {})", reference.url(), self.generation);
        self.requested = Some(reference.clone());
        self.image = None;
        self.detections.clear();
        self.selected = None;
        self.dirty = true;
        DecodeTicket { generation: self.generation, reference }
    }

    pub fn clear_image(&mut self) {
        self.generation += 1;
        self.requested = None;
        self.image = None;
        self.detections.clear();
        self.selected = None;
        self.dirty = true;
    }

    pub fn complete_decode(&mut self, outcome: DecodeOutcome) -> DecodeStatus {
        let DecodeOutcome { ticket, result } = outcome;
        let current = ticket.generation == self.generation
            && self.requested.as_ref() == Some(&ticket.reference);
        if !current {
            debug!(
                "dropping stale decode of {} (generation {}, current {})",
                ticket.reference.url(),
                ticket.generation,
                self.generation
            );
            return DecodeStatus::Stale;
        }
        self.dirty = true;
        match result {
            Ok(pixels) => {
                debug!(
                    "decoded {} at {}x{}",
                    ticket.reference.url(),
                    pixels.width(),
                    pixels.height()
                );
                self.image = Some(DecodedImage { reference: ticket.reference, pixels });
                DecodeStatus::Committed
            }
            Err(err) => {
                warn!("{err}");
                self.image = None;
                DecodeStatus::Failed
            }
        }
    }

    /// Replaces the detection list wholesale. The selection does not survive.
    pub fn set_detections(&mut self, detections: Vec<Detection>) {
        self.detections = detections;
        self.selected = None;
        self.dirty = true;
    }

    /// Selects the detection at `index`. Out-of-range indices clear the selection and return false.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        let valid = index.is_none_or(|i| i < self.detections.len());
        let index = if valid { index } else { None };
        if self.selected != index {
            self.selected = index;
            self.dirty = true;
        }
        valid
    }

    pub fn set_container_width(&mut self, container_width: f32) {
        if self.container_width != container_width {
            self.container_width = container_width;
            self.dirty = true;
        }
    }

    pub fn set_max_height(&mut self, max_height: f32) {
        if self.max_height != max_height {
            self.max_height = max_height;
            self.dirty = true;
        }
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn selected(&self) -> Option<&Detection> {
        self.selected.and_then(|i| self.detections.get(i))
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// The current display transform, if an image is decoded and the layout is valid.
    pub fn fit_box(&self) -> Option<FitBox> {
        let image = self.image.as_ref()?;
        FitBox::compute(
            image.natural_width() as f32,
            image.natural_height() as f32,
            self.max_height,
            self.container_width,
        )
        .ok()
    }

    pub fn redraw<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) -> RenderReport {
        let report = render(
            surface,
            self.image.as_ref(),
            &self.detections,
            self.selected(),
            self.container_width,
            self.max_height,
            &self.style,
        );
        self.dirty = false;
        report
    }

    pub fn redraw_if_needed<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Option<RenderReport> {
        self.dirty.then(|| self.redraw(surface))
    }

    /// Index of the topmost detection under a point given in surface coordinates.
    pub fn hit_test(&self, display_point: Point) -> Option<usize> {
        let fit = self.fit_box()?;
        let natural = fit.to_natural(display_point);
        self.detections
            .iter()
            .enumerate()
            .rev()
            .find(|(_, detection)| detection.polygon.contains(&natural))
            .map(|(index, _)| index)
    }
}
