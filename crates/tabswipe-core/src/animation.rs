use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Spring { damping: f32, stiffness: f32 },
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Spring { damping, stiffness } => {
                // Simplified spring physics
                let omega = (stiffness / damping).sqrt();
                let zeta = damping / (2.0 * (stiffness * damping).sqrt());

                if zeta < 1.0 {
                    // Underdamped
                    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
                    let t = t * 2.0;
                    1.0 - ((-zeta * omega * t).exp() * (omega_d * t).cos())
                } else {
                    t * (2.0 - t)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    /// The settle transition used by tab swipes: short and decelerating.
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(100),
            easing: Easing::EaseOut,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Jumps straight to the target on the first tick.
    pub fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Value that eases towards a target. Time is always supplied by the caller;
/// the host's frame scheduler decides when `update` runs.
#[derive(Clone, Debug)]
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_time: Option<Instant>,
    // Armed by `set_target_deferred`; the clock starts at the next `update`.
    deferred: bool,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_time: None,
            deferred: false,
        }
    }

    /// Starts easing from the current value towards `target`.
    pub fn set_target(&mut self, target: T, now: Instant) {
        self.start = self.current.clone();
        self.target = target;
        self.start_time = Some(now);
        self.deferred = false;
    }

    /// Like `set_target`, for callers with no timestamp at hand: the
    /// animation starts at the first `update`.
    pub fn set_target_deferred(&mut self, target: T) {
        self.start = self.current.clone();
        self.target = target;
        self.start_time = None;
        self.deferred = true;
    }

    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }

    /// Advances to `now`; returns true while the animation is still running.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.deferred {
            self.deferred = false;
            self.start_time = Some(now);
        }
        let Some(start) = self.start_time else {
            return false;
        };
        let elapsed = now.saturating_duration_since(start);

        if elapsed >= self.spec.duration || self.spec.duration.is_zero() {
            self.current = self.target.clone();
            self.start_time = None;
            return false;
        }

        let t = elapsed.as_secs_f32() / self.spec.duration.as_secs_f32();
        let eased_t = self.spec.easing.interpolate(t);
        self.current = self.start.interpolate(&self.target, eased_t);
        true
    }

    /// Halts at whatever value was last produced by `update`.
    pub fn stop(&mut self) -> T {
        self.start_time = None;
        self.deferred = false;
        self.target = self.current.clone();
        self.current.clone()
    }

    /// Jumps to `value` with no animation.
    pub fn snap_to(&mut self, value: T) {
        self.start_time = None;
        self.deferred = false;
        self.start = value.clone();
        self.target = value.clone();
        self.current = value;
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.start_time.is_some() || self.deferred
    }
}
