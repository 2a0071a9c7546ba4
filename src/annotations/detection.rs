use crate::annotations::AnnotationError;
use crate::annotations::polygon::Polygon;
use crate::error::OverlayError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A detection is what an analysis step produces for one recognized object.
///
/// The polygon lives in the natural pixel space of the image it was detected in, so a detection
/// means nothing without that image. The confidence is carried along for callers that want to
/// show it; the overlay renderer labels detections with the class name alone.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Detection {
    #[serde(alias = "class", alias = "label")]
    pub class_id: String,
    pub polygon: Polygon,
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

impl Detection {
    pub fn new(class_id: impl Into<String>, polygon: Polygon, confidence: f32) -> Self {
        Detection { class_id: class_id.into(), polygon, confidence }
    }

    pub fn validate(&self) -> Result<(), AnnotationError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(AnnotationError::ConfidenceOutOfRange {
                class_id: self.class_id.clone(),
                confidence: self.confidence,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionFile {
    Bare(Vec<Detection>),
    Wrapped { detections: Vec<Detection> },
}

/// Reads a list of detections from a json file.
///
/// The file holds either a bare array of detections or an object with a `detections` array.
pub fn read_detections_from_json(filepath: &Path) -> Result<Vec<Detection>, OverlayError> {
    let file = File::open(filepath).map_err(|source| OverlayError::Io {
        path: filepath.to_path_buf(),
        source,
    })?;
    let parsed: DetectionFile = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        OverlayError::Json { path: filepath.to_path_buf(), source }
    })?;
    let detections = match parsed {
        DetectionFile::Bare(detections) => detections,
        DetectionFile::Wrapped { detections } => detections,
    };
    for detection in &detections {
        detection.validate()?;
    }
    Ok(detections)
}
