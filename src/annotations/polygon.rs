use crate::annotations::bounding_box::BoundingBox;
use crate::annotations::point::Point;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

/// An ordered ring of vertices in an image's natural pixel space.
///
/// The ring may arrive explicitly closed (last vertex repeating the first), which is what GeoJSON
/// style producers emit. [`Polygon::vertices`] always hands back the open ring.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Polygon(Vec<Point>);

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Polygon(points)
    }

    /// The open ring, without a trailing duplicate of the first vertex.
    pub fn vertices(&self) -> &[Point] {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) if self.0.len() > 1 && first == last => {
                &self.0[..self.0.len() - 1]
            }
            _ => &self.0,
        }
    }

    /// A polygon needs at least three finite vertices to enclose an area.
    pub fn is_drawable(&self) -> bool {
        let vertices = self.vertices();
        vertices.len() >= 3 && vertices.iter().all(Point::is_finite)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let (left, right) = min_max(self.vertices().iter().map(|p| p.x))?;
        let (top, bottom) = min_max(self.vertices().iter().map(|p| p.y))?;
        BoundingBox::new(left, top, right, bottom).ok()
    }

    pub fn scaled(&self, scale_x: f32, scale_y: f32) -> Vec<Point> {
        self.vertices()
            .iter()
            .map(|p| Point::new(p.x * scale_x, p.y * scale_y))
            .collect()
    }

    /// Even-odd ray cast. Points exactly on an edge may land either way.
    pub fn contains(&self, point: &Point) -> bool {
        if !self.is_drawable() {
            return false;
        }
        let Some(bbox) = self.bounding_box() else {
            return false;
        };
        if point.x < bbox.left()
            || point.x > bbox.right()
            || point.y < bbox.top()
            || point.y > bbox.bottom()
        {
            return false;
        }
        let vertices = self.vertices();
        let mut inside = false;
        for (a, b) in vertices.iter().circular_tuple_windows() {
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
        }
        inside
    }
}

fn min_max(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}
