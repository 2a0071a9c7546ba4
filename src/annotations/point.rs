use serde::{Deserialize, Serialize};
use std::fmt;

/// A struct representing a simple point.
///
/// Points are read either as `{"x": .., "y": ..}` objects or as `[x, y]` pairs, which is how
/// segmentation backends usually emit polygon vertices.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(from = "PointRepr")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point {{ x: {}, y: {} }}", self.x, self.y)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Pair([f32; 2]),
    Named { x: f32, y: f32 },
}

impl From<PointRepr> for Point {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Pair([x, y]) => Point { x, y },
            PointRepr::Named { x, y } => Point { x, y },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_pairs_and_objects() {
        let points: Vec<Point> =
            serde_json::from_str(r#"[[1, 2], {"x": 3.5, "y": 4}]"#).unwrap();
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.5, 4.0)]);
    }

    #[test]
    fn writes_objects() {
        let json = serde_json::to_string(&Point::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0}"#);
    }
}
