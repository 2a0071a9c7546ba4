pub mod overlay_view;

pub use overlay_view::{DecodeStatus, OverlayView};
