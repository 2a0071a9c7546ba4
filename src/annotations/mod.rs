pub mod bounding_box;
pub mod detection;
pub mod point;
pub mod polygon;

pub use bounding_box::BoundingBox;
pub use detection::{Detection, read_detections_from_json};
pub use point::Point;
pub use polygon::Polygon;

/// Errors raised while building or validating annotations.
#[derive(thiserror::Error, Debug)]
pub enum AnnotationError {
    #[error("bounding box is inverted on the {axis} axis ({low} > {high})")]
    InvertedBox { axis: &'static str, low: f32, high: f32 },
    #[error("detection '{class_id}' has confidence {confidence} outside [0, 1]")]
    ConfidenceOutOfRange { class_id: String, confidence: f32 },
}
