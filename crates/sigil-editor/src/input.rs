//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events into a unified `InputEvent`
//! consumed by the composition session. Coordinates are in surface
//! pixels, already mapped from client space by the host.

use sigil_core::Point;

/// A normalized input event from any pointing device or the keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved while pressed or hovering.
    PointerMove { x: f64, y: f64 },

    /// Pointer released, or the gesture was lost (leave, touch cancel).
    PointerUp,

    /// Keyboard shortcut candidate. Only the command modifiers matter.
    Key { key: String, ctrl: bool, meta: bool },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn key(key: impl Into<String>, ctrl: bool, meta: bool) -> Self {
        Self::Key {
            key: key.into(),
            ctrl,
            meta,
        }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

/// Map a client-space point into surface pixels, given the displayed
/// element rectangle and the surface's intrinsic size.
///
/// Returns `None` when the displayed rectangle is degenerate.
pub fn client_to_surface(
    client: Point,
    display_left: f64,
    display_top: f64,
    display_width: f64,
    display_height: f64,
    surface_width: u32,
    surface_height: u32,
) -> Option<Point> {
    if display_width <= 0.0 || display_height <= 0.0 {
        return None;
    }
    let sx = surface_width as f64 / display_width;
    let sy = surface_height as f64 / display_height;
    Some(Point::new(
        (client.x - display_left) * sx,
        (client.y - display_top) * sy,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn position_only_for_positioned_events() {
        assert_eq!(
            InputEvent::pointer_down(3.0, 4.0).position(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(InputEvent::PointerUp.position(), None);
        assert_eq!(InputEvent::key("e", true, false).position(), None);
    }

    #[test]
    fn key_events_carry_command_modifiers() {
        assert_eq!(
            InputEvent::key("E", false, true),
            InputEvent::Key {
                key: "E".into(),
                ctrl: false,
                meta: true
            }
        );
    }

    #[test]
    fn client_points_scale_to_surface() {
        // A 1200px-wide banner shown at 600px.
        let p = client_to_surface(Point::new(110.0, 60.0), 10.0, 10.0, 600.0, 240.0, 1200, 480);
        assert_eq!(p, Some(Point::new(200.0, 100.0)));
        assert_eq!(
            client_to_surface(Point::new(0.0, 0.0), 0.0, 0.0, 0.0, 10.0, 10, 10),
            None
        );
    }
}
