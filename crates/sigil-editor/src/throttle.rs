//! Trailing-edge timers for coalescing renders and autosaves.
//!
//! The host drives time: `schedule` marks work pending, `poll` reports
//! whether it is due. Nothing here sleeps or spawns.

use std::time::{Duration, Instant};

/// How a repeated `schedule` affects a pending deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Keep the first deadline; fire at most once per interval while
    /// requests keep coming.
    Throttle,
    /// Push the deadline out; fire once requests go quiet.
    Debounce,
}

#[derive(Debug, Clone)]
pub struct Timer {
    interval: Duration,
    policy: Policy,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn throttle(interval: Duration) -> Self {
        Self {
            interval,
            policy: Policy::Throttle,
            deadline: None,
        }
    }

    pub fn debounce(interval: Duration) -> Self {
        Self {
            interval,
            policy: Policy::Debounce,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        match (self.policy, self.deadline) {
            (Policy::Throttle, Some(_)) => {}
            _ => self.deadline = Some(now + self.interval),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// `true` once when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire immediately if anything is pending.
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
