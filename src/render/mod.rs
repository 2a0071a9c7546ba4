pub mod overlay;
pub mod palette;
pub mod raster;
#[cfg(test)]
pub(crate) mod recording;
pub mod style;
pub mod surface;

pub use overlay::{RenderReport, RenderStatus, place_label, render};
pub use raster::{RasterSurface, bundled_font, load_font};
pub use style::OverlayStyle;
pub use surface::{DrawingSurface, Rect, TextMetrics};
