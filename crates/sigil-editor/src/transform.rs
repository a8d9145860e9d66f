//! Transform controller: the drag / resize / rotate state machine.
//!
//! ```text
//!   Idle ──start_drag──────────────▶ Dragging ─┐
//!    ▲  ──start_handle_transform──▶ HandleTransforming(h) ─┤
//!    └──────────────── end ◀──────────────────────────────┘
//! ```
//!
//! Each session snapshots the transform it started from and recomputes
//! the whole transform from that snapshot on every sample, so samples are
//! never compounded. Starting a session while another is active replaces
//! it outright.

use sigil_core::geometry::angle_deg;
use sigil_core::{Handle, Point, Size, Transform, TransformLimits, normalize_degrees, signature_center};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start: Point,
    pub start_transform: Transform,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleSession {
    pub handle: Handle,
    pub start: Point,
    pub start_transform: Transform,
    /// Unscaled signature size in pixels.
    pub dims: Size,
    /// Pointer angle at the previous rotate sample.
    last_angle: f64,
    /// Angular displacement accumulated since the session began.
    swept: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragSession),
    HandleTransforming(HandleSession),
}

#[derive(Debug, Clone, Default)]
pub struct TransformController {
    limits: TransformLimits,
    gesture: Gesture,
}

impl TransformController {
    pub fn new(limits: TransformLimits) -> Self {
        Self {
            limits,
            gesture: Gesture::Idle,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.gesture {
            Gesture::HandleTransforming(s) => Some(s.handle),
            _ => None,
        }
    }

    pub fn start_drag(&mut self, pointer: Point, current: Transform) {
        if self.is_active() {
            log::debug!("restarting gesture as drag");
        }
        self.gesture = Gesture::Dragging(DragSession {
            start: pointer,
            start_transform: current,
        });
        log::debug!("drag start at ({}, {})", pointer.x, pointer.y);
    }

    pub fn start_handle_transform(&mut self, handle: Handle, pointer: Point, current: Transform, dims: Size) {
        if self.is_active() {
            log::debug!("restarting gesture as {} handle", handle.key());
        }
        let center = signature_center(&current, dims);
        self.gesture = Gesture::HandleTransforming(HandleSession {
            handle,
            start: pointer,
            start_transform: current,
            dims,
            last_angle: angle_deg(center, pointer),
            swept: 0.0,
        });
        log::debug!("{} handle start at ({}, {})", handle.key(), pointer.x, pointer.y);
    }

    /// Feed one pointer sample. Returns the new transform when the active
    /// session produced one, `None` when idle or the sample was unusable.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Transform> {
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            return None;
        }
        let limits = self.limits;
        match &mut self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging(s) => Some(drag(s, pointer)),
            Gesture::HandleTransforming(s) => match s.handle.resize_signs() {
                None => Some(rotate(s, pointer)),
                Some(signs) => resize(s, signs, pointer, &limits),
            },
        }
    }

    /// End the active session, if any.
    pub fn end(&mut self) {
        if self.is_active() {
            log::debug!("gesture end");
        }
        self.gesture = Gesture::Idle;
    }
}

fn drag(s: &DragSession, p: Point) -> Transform {
    s.start_transform.translated(p.x - s.start.x, p.y - s.start.y)
}

/// Rotation follows the pointer's angle around the signature center,
/// accumulated sample by sample with each step folded into (-180, 180].
///
/// This differs from `start + (current - start_angle)` on purpose: the
/// one-shot difference jumps by 360° whenever the pointer crosses the
/// atan2 seam, while the accumulated sum keeps sweeps past a half turn
/// continuous. The cost is that two consecutive samples more than 180°
/// apart are read as the short way round.
fn rotate(s: &mut HandleSession, p: Point) -> Transform {
    let center = signature_center(&s.start_transform, s.dims);
    let angle = angle_deg(center, p);
    s.swept += normalize_degrees(angle - s.last_angle);
    s.last_angle = angle;
    s.start_transform
        .with_rotation(s.start_transform.rotation + s.swept)
}

fn resize(s: &HandleSession, (sx, sy): (f64, f64), p: Point, limits: &TransformLimits) -> Option<Transform> {
    let reference = s.dims.width.max(s.dims.height);
    if reference <= 0.0 {
        return None;
    }
    let eff_dx = (p.x - s.start.x) * sx;
    let eff_dy = (p.y - s.start.y) * sy;
    let change = eff_dx.max(eff_dy) / reference;
    Some(
        s.start_transform
            .with_scale(s.start_transform.scale + change, limits),
    )
}
