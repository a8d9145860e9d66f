//! Hit testing: point → selection box part.
//!
//! Handles are checked first (in the rotated frame of the box), then
//! the box body (axis-aligned, rotation ignored).

use kurbo::{Point, Vec2};
use sigil_core::{Handle, SignatureBox};

/// Radius around a handle center that still grabs it.
pub const HANDLE_RADIUS: f64 = 6.0;

/// Distance of the rotate handle above the box's top edge.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Handle(Handle),
    Body,
}

/// Handle center in box-local (unrotated) coordinates.
fn local_handle_position(b: &SignatureBox, handle: Handle) -> Point {
    match handle {
        Handle::TopLeft => Point::new(0.0, 0.0),
        Handle::TopRight => Point::new(b.width, 0.0),
        Handle::BottomLeft => Point::new(0.0, b.height),
        Handle::BottomRight => Point::new(b.width, b.height),
        Handle::Rotate => Point::new(b.width / 2.0, -ROTATE_HANDLE_OFFSET),
    }
}

/// Map a layout-space point into the box's local, unrotated frame.
fn to_local(b: &SignatureBox, p: Point) -> Point {
    let center = b.center();
    let d = p - center;
    let (sin, cos) = (-b.rotation.to_radians()).sin_cos();
    let r = Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos);
    Point::new(r.x + b.width / 2.0, r.y + b.height / 2.0)
}

/// Handle center in layout space, following the box rotation.
pub fn handle_position(b: &SignatureBox, handle: Handle) -> Point {
    let local = local_handle_position(b, handle);
    let half = Vec2::new(b.width / 2.0, b.height / 2.0);
    let d = local.to_vec2() - half;
    let (sin, cos) = b.rotation.to_radians().sin_cos();
    b.center() + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// The handle under `p`, if any.
pub fn hit_test_handles(b: &SignatureBox, p: Point) -> Option<Handle> {
    let local = to_local(b, p);
    Handle::ALL
        .into_iter()
        .find(|&h| local.distance(local_handle_position(b, h)) <= HANDLE_RADIUS)
}

/// Resolve a pointer-down against the selection box.
///
/// Handles only count while the box is shown.
pub fn hit_test(b: &SignatureBox, p: Point, handles_visible: bool) -> Option<Hit> {
    if handles_visible && let Some(handle) = hit_test_handles(b, p) {
        return Some(Hit::Handle(handle));
    }
    if b.contains(p.x, p.y) {
        return Some(Hit::Body);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_box(rotation: f64) -> SignatureBox {
        SignatureBox {
            left: 100.0,
            top: 100.0,
            width: 200.0,
            height: 100.0,
            rotation,
        }
    }

    #[test]
    fn corners_and_rotate_handle() {
        let b = test_box(0.0);
        assert_eq!(hit_test(&b, Point::new(101.0, 99.0), true), Some(Hit::Handle(Handle::TopLeft)));
        assert_eq!(hit_test(&b, Point::new(300.0, 200.0), true), Some(Hit::Handle(Handle::BottomRight)));
        assert_eq!(hit_test(&b, Point::new(200.0, 70.0), true), Some(Hit::Handle(Handle::Rotate)));
        assert_eq!(hit_test(&b, Point::new(200.0, 150.0), true), Some(Hit::Body));
        assert_eq!(hit_test(&b, Point::new(50.0, 50.0), true), None);
    }

    #[test]
    fn hidden_handles_fall_through_to_body() {
        let b = test_box(0.0);
        assert_eq!(hit_test(&b, Point::new(101.0, 101.0), false), Some(Hit::Body));
        assert_eq!(hit_test(&b, Point::new(200.0, 70.0), false), None);
    }

    #[test]
    fn handles_follow_rotation() {
        // Rotated half a turn, the rotate handle sits below the box.
        let b = test_box(180.0);
        let p = handle_position(&b, Handle::Rotate);
        assert!((p.x - 200.0).abs() < 1e-9);
        assert!((p.y - 230.0).abs() < 1e-9);
        assert_eq!(hit_test_handles(&b, Point::new(200.0, 229.0)), Some(Handle::Rotate));
        assert_eq!(hit_test_handles(&b, Point::new(200.0, 70.0)), None);
    }
}
