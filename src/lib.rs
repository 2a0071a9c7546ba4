//! Detection overlays for crop-health imagery.
//!
//! Fits a photo into an on-screen box while keeping its aspect ratio, then draws detected
//! disease and weed polygons on top of it with per-class colors and clamped text labels.

pub mod annotations;
pub mod batch;
pub mod config;
pub mod error;
pub mod image_utils;
pub mod layout;
pub mod render;
pub mod view;

pub use annotations::{Detection, Point, Polygon};
pub use error::OverlayError;
pub use layout::{FitBox, FitError};
pub use render::{DrawingSurface, OverlayStyle, RasterSurface, RenderReport, RenderStatus, render};
pub use view::{DecodeStatus, OverlayView};
