//! Integration tests: transform controller gestures (sigil-editor).
//!
//! Drag, corner resize and rotate sessions driven by raw pointer samples,
//! checked against the transform they should produce.

use pretty_assertions::assert_eq;
use sigil_core::{Handle, Point, Size, Transform, TransformLimits, signature_center};
use sigil_editor::transform::{Gesture, TransformController};

const DIMS: Size = Size::new(240.0, 80.0);

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn start() -> Transform {
    Transform {
        x: 40.0,
        y: 60.0,
        scale: 1.5,
        rotation: 12.0,
        opacity: 0.8,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ─── Scale clamp ─────────────────────────────────────────────────────────

#[test]
fn resize_never_leaves_scale_limits() {
    init_logs();
    let limits = TransformLimits::default();
    for handle in [Handle::TopLeft, Handle::TopRight, Handle::BottomLeft, Handle::BottomRight] {
        let mut c = TransformController::new(limits);
        c.start_handle_transform(handle, Point::new(300.0, 300.0), start(), DIMS);
        for step in -40..=40 {
            let d = step as f64 * 50.0;
            let t = c.pointer_move(Point::new(300.0 + d, 300.0 - d * 0.5)).unwrap();
            assert!(
                t.scale >= limits.min_scale && t.scale <= limits.max_scale,
                "{:?} gave scale {}",
                handle,
                t.scale
            );
        }
    }
}

// ─── Drag is pure translation ────────────────────────────────────────────

#[test]
fn drag_only_moves() {
    init_logs();
    let mut c = TransformController::default();
    c.start_drag(Point::new(100.0, 100.0), start());
    let mut last = None;
    for (x, y) in [(110.0, 90.0), (250.0, -30.0), (93.0, 141.0)] {
        last = c.pointer_move(Point::new(x, y));
    }
    c.end();
    let t = last.unwrap();
    assert_eq!(
        t,
        Transform {
            x: 33.0,
            y: 101.0,
            ..start()
        }
    );
}

// ─── Rotation continuity ─────────────────────────────────────────────────

fn sweep(theta: f64, grab_angle: f64, radius: f64) -> f64 {
    let center = signature_center(&start(), DIMS);
    let at = |deg: f64| {
        let r = deg.to_radians();
        Point::new(center.x + radius * r.cos(), center.y + radius * r.sin())
    };

    let mut c = TransformController::default();
    c.start_handle_transform(Handle::Rotate, at(grab_angle), start(), DIMS);

    let steps = (theta.abs() / 5.0).ceil() as usize;
    let mut rotation = start().rotation;
    for i in 1..=steps {
        let a = grab_angle + theta * i as f64 / steps as f64;
        rotation = c.pointer_move(at(a)).unwrap().rotation;
    }
    rotation - start().rotation
}

#[test]
fn rotation_follows_pointer_sweep() {
    init_logs();
    for theta in [30.0, 90.0, 180.0, 350.0, -120.0] {
        for grab in [-90.0, 0.0, 45.0, 170.0] {
            for radius in [20.0, 300.0] {
                let swept = sweep(theta, grab, radius);
                assert!(
                    approx(swept, theta),
                    "theta {} grab {} radius {} swept {}",
                    theta,
                    grab,
                    radius,
                    swept
                );
            }
        }
    }
}

#[test]
fn rotation_keeps_position_and_scale() {
    let center = signature_center(&start(), DIMS);
    let mut c = TransformController::default();
    c.start_handle_transform(Handle::Rotate, Point::new(center.x, center.y - 50.0), start(), DIMS);
    let t = c.pointer_move(Point::new(center.x + 50.0, center.y)).unwrap();
    assert!(approx(t.rotation, start().rotation + 90.0));
    assert_eq!((t.x, t.y, t.scale, t.opacity), (40.0, 60.0, 1.5, 0.8));
}

// ─── Resize anchor ───────────────────────────────────────────────────────

#[test]
fn resize_anchors_top_left_for_every_corner() {
    for handle in [Handle::TopLeft, Handle::TopRight, Handle::BottomLeft, Handle::BottomRight] {
        let mut c = TransformController::default();
        c.start_handle_transform(handle, Point::new(0.0, 0.0), start(), DIMS);
        let t = c.pointer_move(Point::new(37.0, -21.0)).unwrap();
        assert_eq!((t.x, t.y, t.rotation, t.opacity), (40.0, 60.0, 12.0, 0.8));
    }
}

#[test]
fn outward_drag_grows_for_each_corner() {
    // Moving away from the box center along each corner's diagonal.
    let cases = [
        (Handle::BottomRight, 24.0, 24.0),
        (Handle::TopLeft, -24.0, -24.0),
        (Handle::TopRight, 24.0, -24.0),
        (Handle::BottomLeft, -24.0, 24.0),
    ];
    for (handle, dx, dy) in cases {
        let mut c = TransformController::default();
        c.start_handle_transform(handle, Point::new(500.0, 500.0), start(), DIMS);
        let t = c.pointer_move(Point::new(500.0 + dx, 500.0 + dy)).unwrap();
        assert!(approx(t.scale, 1.6), "{:?} gave {}", handle, t.scale);
    }
}

// ─── Session exclusivity ─────────────────────────────────────────────────

#[test]
fn handle_start_replaces_drag() {
    init_logs();
    let mut c = TransformController::default();
    c.start_drag(Point::new(10.0, 10.0), start());
    c.pointer_move(Point::new(90.0, 90.0));

    c.start_handle_transform(Handle::BottomRight, Point::new(10.0, 10.0), start(), DIMS);
    assert!(matches!(c.gesture(), Gesture::HandleTransforming(_)));

    let t = c.pointer_move(Point::new(34.0, 10.0)).unwrap();
    assert_eq!((t.x, t.y), (40.0, 60.0));
    assert!(approx(t.scale, 1.6));
}

#[test]
fn drag_start_replaces_handle_session() {
    let mut c = TransformController::default();
    c.start_handle_transform(Handle::Rotate, Point::new(0.0, 0.0), start(), DIMS);
    c.start_drag(Point::new(0.0, 0.0), start());
    let t = c.pointer_move(Point::new(5.0, 5.0)).unwrap();
    assert_eq!(t, start().translated(5.0, 5.0));
    assert_eq!(c.active_handle(), None);
}
