use crate::annotations::AnnotationError;
use std::path::PathBuf;

/// Errors surfaced by file-backed operations: reading images, detections, fonts and configs.
///
/// Drawing itself never fails; a missing image or a degenerate polygon is skipped, not raised.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid detections file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("font {} could not be parsed", .path.display())]
    Font { path: PathBuf },
    #[error("bundled label font could not be parsed")]
    BundledFont(#[source] ab_glyph::InvalidFont),
    #[error("image decode task failed: {0}")]
    DecodeTask(String),
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}
