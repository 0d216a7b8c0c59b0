use tabswipe_core::Vec2;
use web_time::{Duration, Instant};

/// Which on-screen neighbour a drag is revealing.
///
/// `TowardRight` means the slot to the right of the selection slides into
/// view, i.e. the strip itself moves towards negative x.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DirectionVerdict {
    TowardRight,
    TowardLeft,
    #[default]
    Undetermined,
}

impl DirectionVerdict {
    /// From a horizontal displacement of the strip (or of the finger).
    pub fn from_displacement(dx: f32) -> Self {
        if dx < 0.0 {
            DirectionVerdict::TowardRight
        } else if dx > 0.0 {
            DirectionVerdict::TowardLeft
        } else {
            DirectionVerdict::Undetermined
        }
    }

    pub fn mirrored(self) -> Self {
        match self {
            DirectionVerdict::TowardRight => DirectionVerdict::TowardLeft,
            DirectionVerdict::TowardLeft => DirectionVerdict::TowardRight,
            DirectionVerdict::Undetermined => DirectionVerdict::Undetermined,
        }
    }
}

/// Snapshot of one gesture, from press until release or cancel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    pub is_pressed: bool,
    pub is_moved: bool,
    pub start_point: Vec2,
    pub last_point: Vec2,
    pub start_time: Instant,
    pub last_time: Instant,
    /// Units per second, positive when the finger travels towards +x.
    pub velocity_x: f32,
}

impl GestureState {
    /// Finger travel since press.
    pub fn total_delta(&self) -> f32 {
        self.last_point.x - self.start_point.x
    }

    pub fn elapsed(&self) -> Duration {
        self.last_time.saturating_duration_since(self.start_time)
    }
}

/// Turns the press/move/release stream into deltas and a velocity.
#[derive(Debug, Default)]
pub struct GestureTracker {
    state: Option<GestureState>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture. Returns false (and changes nothing) if one is
    /// already in progress.
    pub fn on_press(&mut self, point: Vec2, time: Instant) -> bool {
        if self.state.is_some() {
            return false;
        }
        self.state = Some(GestureState {
            is_pressed: true,
            is_moved: false,
            start_point: point,
            last_point: point,
            start_time: time,
            last_time: time,
            velocity_x: 0.0,
        });
        true
    }

    /// Horizontal delta since the previous sample, or `None` when no
    /// gesture is in progress.
    pub fn on_move(&mut self, point: Vec2, time: Instant) -> Option<f32> {
        let st = self.state.as_mut()?;
        st.is_moved = true;
        let delta = point.x - st.last_point.x;
        st.last_point = point;
        st.last_time = time;
        st.velocity_x = running_velocity(st.start_point.x, point.x, st.start_time, time)
            .unwrap_or(st.velocity_x);
        Some(delta)
    }

    /// Ends the gesture and returns its final state with the velocity
    /// computed over the whole press.
    pub fn on_release(&mut self, point: Vec2, time: Instant) -> Option<GestureState> {
        let mut st = self.state.take()?;
        st.velocity_x = running_velocity(st.start_point.x, point.x, st.start_time, time)
            .unwrap_or(st.velocity_x);
        st.last_time = time;
        Some(st)
    }

    pub fn cancel(&mut self) -> Option<GestureState> {
        self.state.take()
    }

    pub fn is_pressed(&self) -> bool {
        self.state.is_some_and(|s| s.is_pressed)
    }

    pub fn state(&self) -> Option<&GestureState> {
        self.state.as_ref()
    }
}

// None when no time has passed; callers keep their previous estimate.
fn running_velocity(start_x: f32, x: f32, start: Instant, now: Instant) -> Option<f32> {
    let dt = now.saturating_duration_since(start).as_secs_f32();
    (dt > 0.0).then(|| (x - start_x) / dt)
}
