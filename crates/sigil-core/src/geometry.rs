//! Pure geometry over a transform and the signature's intrinsic size.
//!
//! The selection box is axis-aligned in layout space; rotation is carried
//! alongside as a presentation value and applied about the box center.

use crate::model::Transform;
use kurbo::{Point, Rect, Size};

/// Resolved geometry of the selection outline around the signature.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignatureBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, unnormalized.
    pub rotation: f64,
}

/// Map a transform and the signature's unscaled pixel size to its box.
pub fn signature_box(transform: &Transform, dims: Size) -> SignatureBox {
    SignatureBox {
        left: transform.x,
        top: transform.y,
        width: dims.width * transform.scale,
        height: dims.height * transform.scale,
        rotation: transform.rotation,
    }
}

/// Visual center of the scaled signature, the pivot for rotation.
pub fn signature_center(transform: &Transform, dims: Size) -> Point {
    signature_box(transform, dims).center()
}

impl SignatureBox {
    /// Inclusive on all four edges. Rotation is ignored.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.left
            && px <= self.left + self.width
            && py >= self.top
            && py <= self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// Rotation folded into (-180, 180] for sliders and labels.
    pub fn display_rotation(&self) -> f64 {
        normalize_degrees(self.rotation)
    }

    /// CSS-style `rotate(<deg>deg)` presentation string.
    pub fn css_rotate(&self) -> String {
        format!("rotate({}deg)", self.rotation)
    }
}

/// Fold an angle in degrees into (-180, 180].
pub fn normalize_degrees(deg: f64) -> f64 {
    let folded = deg.rem_euclid(360.0);
    if folded > 180.0 { folded - 360.0 } else { folded }
}

/// Angle in degrees from `center` to `p`, in (-180, 180].
pub fn angle_deg(center: Point, p: Point) -> f64 {
    (p - center).atan2().to_degrees()
}
