use crate::geometry::{ImageSize, Point, Rect};

use super::shapes::{Shape, ShapeId};

/// Drags must exceed this many base-image pixels in both dimensions to commit.
pub const MIN_SHAPE_EXTENT: f64 = 2.0;

pub fn normalize_drag_box(anchor: Point, current: Point) -> Rect {
    Rect::from_corners(anchor, current)
}

/// Top-most shape containing `point`; later shapes paint over earlier ones, so
/// the scan runs back to front.
pub fn top_shape_id_at_point(shapes: &[Shape], point: Point) -> Option<ShapeId> {
    shapes
        .iter()
        .rev()
        .find(|shape| shape.rect.contains(point))
        .map(Shape::id)
}

/// Maps pointer positions from the displayed surface into base-image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMapping {
    image: ImageSize,
    display_width: f64,
    display_height: f64,
}

impl DisplayMapping {
    /// Identity mapping: the surface is shown at intrinsic size.
    pub fn intrinsic(image: ImageSize) -> Self {
        Self {
            image,
            display_width: f64::from(image.width),
            display_height: f64::from(image.height),
        }
    }

    pub fn resize(&mut self, display_width: f64, display_height: f64) {
        self.display_width = display_width;
        self.display_height = display_height;
    }

    pub fn display_size(&self) -> (f64, f64) {
        (self.display_width, self.display_height)
    }

    pub fn to_image(&self, display_point: Point) -> Point {
        Point::new(
            display_point.x * axis_scale(self.image.width, self.display_width),
            display_point.y * axis_scale(self.image.height, self.display_height),
        )
    }
}

fn axis_scale(intrinsic: u32, displayed: f64) -> f64 {
    if displayed.is_finite() && displayed > 0.0 {
        f64::from(intrinsic) / displayed
    } else {
        1.0
    }
}
