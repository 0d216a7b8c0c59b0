use web_time::Instant;

use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerAction {
    Pressed,
    Moved,
    Released,
    /// The platform took the pointer away (scroll parent stole it, window
    /// lost focus, ...). Never commits.
    Cancelled,
}

/// One pointer sample, already normalized by the platform adapter to the
/// content area's local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    pub action: PointerAction,
    pub point: Vec2,
    pub timestamp: Instant,
}

impl InputEvent {
    pub fn new(action: PointerAction, point: Vec2, timestamp: Instant) -> Self {
        Self {
            action,
            point,
            timestamp,
        }
    }

    pub fn pressed(x: f32, timestamp: Instant) -> Self {
        Self::new(PointerAction::Pressed, Vec2::new(x, 0.0), timestamp)
    }

    pub fn moved(x: f32, timestamp: Instant) -> Self {
        Self::new(PointerAction::Moved, Vec2::new(x, 0.0), timestamp)
    }

    pub fn released(x: f32, timestamp: Instant) -> Self {
        Self::new(PointerAction::Released, Vec2::new(x, 0.0), timestamp)
    }

    pub fn cancelled(x: f32, timestamp: Instant) -> Self {
        Self::new(PointerAction::Cancelled, Vec2::new(x, 0.0), timestamp)
    }
}
