use crate::annotations::AnnotationError;
use crate::annotations::point::Point;

/// A struct representing an axis-aligned bounding box.
///
/// A bounding box is the smallest rectangle that totally contains an annotation. The overlay
/// renderer only needs it to anchor a label at the top-left of a detection's polygon.
///
/// This project uses the standard convention of the left side of the image being x=0 and the top
/// of the image being y=0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl BoundingBox {
    /// Checks if a box has valid parameters before constructing.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self, AnnotationError> {
        if left > right {
            Err(AnnotationError::InvertedBox { axis: "x", low: left, high: right })
        } else if top > bottom {
            Err(AnnotationError::InvertedBox { axis: "y", low: top, high: bottom })
        } else {
            Ok(BoundingBox { left, top, right, bottom })
        }
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn min_corner(&self) -> Point {
        Point::new(self.left, self.top)
    }
}
