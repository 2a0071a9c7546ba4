use crate::annotations::point::Point;

/// Absorbs float error so a fitted 499.99997 still yields a 500-pixel surface.
const SURFACE_TOLERANCE: f32 = 1e-3;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum FitError {
    /// The image has no usable natural dimensions yet, so there is nothing to draw.
    #[error("image dimensions are not available ({width}x{height})")]
    NotReady { width: f32, height: f32 },
    #[error("layout constraint {name} must be positive and finite, got {value}")]
    InvalidConstraint { name: &'static str, value: f32 },
}

/// The "contain" transform that fits an image of natural size into a height budget and an
/// available container width, keeping its aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitBox {
    pub natural_width: f32,
    pub natural_height: f32,
    pub render_width: f32,
    pub render_height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// The smaller of the two axis scales. Stroke widths, padding and font sizes use it.
    pub uniform_scale: f32,
}

impl FitBox {
    /// Fits the image height-first, then width.
    ///
    /// Images smaller than both bounds keep their natural size.
    pub fn compute(
        natural_width: f32,
        natural_height: f32,
        max_height: f32,
        available_width: f32,
    ) -> Result<FitBox, FitError> {
        if !(natural_width.is_finite() && natural_width > 0.0)
            || !(natural_height.is_finite() && natural_height > 0.0)
        {
            return Err(FitError::NotReady { width: natural_width, height: natural_height });
        }
        if !(max_height.is_finite() && max_height > 0.0) {
            return Err(FitError::InvalidConstraint { name: "max_height", value: max_height });
        }
        if !(available_width.is_finite() && available_width > 0.0) {
            return Err(FitError::InvalidConstraint {
                name: "available_width",
                value: available_width,
            });
        }

        let aspect = natural_width / natural_height;
        let mut render_width = natural_width;
        let mut render_height = natural_height;
        if render_height > max_height {
            render_height = max_height;
            render_width = render_height * aspect;
        }
        if render_width > available_width {
            render_width = available_width;
            render_height = render_width / aspect;
        }

        let scale_x = render_width / natural_width;
        let scale_y = render_height / natural_height;
        Ok(FitBox {
            natural_width,
            natural_height,
            render_width,
            render_height,
            scale_x,
            scale_y,
            uniform_scale: scale_x.min(scale_y),
        })
    }

    /// Integer surface dimensions, never zero and never larger than the bounds the box was
    /// fitted into.
    pub fn surface_size(&self) -> (u32, u32) {
        let whole = |v: f32| ((v + SURFACE_TOLERANCE).floor() as u32).max(1);
        (whole(self.render_width), whole(self.render_height))
    }

    pub fn to_display(&self, point: Point) -> Point {
        Point::new(point.x * self.scale_x, point.y * self.scale_y)
    }

    pub fn to_natural(&self, point: Point) -> Point {
        Point::new(point.x / self.scale_x, point.y / self.scale_y)
    }
}
