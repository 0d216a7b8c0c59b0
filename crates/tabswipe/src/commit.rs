//! Release decision and settle animation.
//!
//! ```text
//! Idle ──first move──▶ Dragging ──release──▶ Committing ──settled──▶ Idle
//!                                       └──▶ SnappingBack ─settled──▶ Idle
//! ```
//!
//! A press while `Committing`/`SnappingBack` halts the animation where it
//! stands (see [`TransitionCommitter::interrupt`]).

use tabswipe_core::{AnimatedValue, AnimationSpec};
use web_time::Instant;

use crate::config::EngineConfig;
use crate::gestures::DirectionVerdict;
use crate::position::ScreenNeighbors;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Dragging,
    Committing,
    SnappingBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitRule {
    Velocity,
    Translation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseDecision {
    Commit { to: usize, rule: CommitRule },
    SnapBack,
}

/// Everything the release rules look at.
#[derive(Clone, Copy, Debug)]
pub struct ReleaseInput {
    pub velocity_x: f32,
    pub translation_x: f32,
    pub baseline: f32,
    pub slot_width: f32,
    pub neighbors: ScreenNeighbors,
}

/// Selection change whose settle animation is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingCommit {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Nothing is animating.
    Idle,
    Running(f32),
    Settled {
        translation: f32,
        commit: Option<PendingCommit>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Halted {
    pub translation: f32,
    pub commit: Option<PendingCommit>,
}

#[derive(Debug)]
pub struct TransitionCommitter {
    phase: TransitionPhase,
    settle: AnimatedValue<f32>,
    pending: Option<PendingCommit>,
}

impl TransitionCommitter {
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            settle: AnimatedValue::new(0.0, spec),
            pending: None,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_settling(&self) -> bool {
        matches!(
            self.phase,
            TransitionPhase::Committing | TransitionPhase::SnappingBack
        )
    }

    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.settle.set_spec(spec);
    }

    pub fn begin_drag(&mut self) {
        self.phase = TransitionPhase::Dragging;
    }

    /// Release rules, first match wins:
    /// 1. fast enough, towards an approved neighbour;
    /// 2. far enough, towards an approved neighbour;
    /// 3. snap back.
    ///
    /// `approve` is only consulted for a neighbour that a rule would
    /// otherwise commit to.
    pub fn decide(
        input: &ReleaseInput,
        config: &EngineConfig,
        mut approve: impl FnMut(usize) -> bool,
    ) -> ReleaseDecision {
        let v = input.velocity_x;
        if v.is_finite() && v != 0.0 && v.abs() >= config.velocity_threshold {
            let dir = DirectionVerdict::from_displacement(v);
            if let Some(to) = input.neighbors.toward(dir)
                && approve(to)
            {
                return ReleaseDecision::Commit {
                    to,
                    rule: CommitRule::Velocity,
                };
            }
        }

        let displacement = input.translation_x - input.baseline;
        if input.slot_width > 0.0
            && displacement.abs() >= input.slot_width * config.translation_ratio
        {
            let dir = DirectionVerdict::from_displacement(displacement);
            if let Some(to) = input.neighbors.toward(dir)
                && approve(to)
            {
                return ReleaseDecision::Commit {
                    to,
                    rule: CommitRule::Translation,
                };
            }
        }

        ReleaseDecision::SnapBack
    }

    /// Starts the commit animation. With `now == None` the clock starts at
    /// the next tick.
    pub fn commit(&mut self, commit: PendingCommit, from: f32, to: f32, now: Option<Instant>) {
        self.pending = Some(commit);
        self.phase = TransitionPhase::Committing;
        self.animate(from, to, now);
    }

    /// Animates back to `to` with no index change. Already there: goes
    /// straight to `Idle`.
    pub fn snap_back(&mut self, from: f32, to: f32, now: Option<Instant>) {
        self.pending = None;
        if from == to {
            self.settle.snap_to(to);
            self.phase = TransitionPhase::Idle;
            return;
        }
        self.phase = TransitionPhase::SnappingBack;
        self.animate(from, to, now);
    }

    fn animate(&mut self, from: f32, to: f32, now: Option<Instant>) {
        self.settle.snap_to(from);
        match now {
            Some(now) => self.settle.set_target(to, now),
            None => self.settle.set_target_deferred(to),
        }
    }

    pub fn tick(&mut self, now: Instant) -> Step {
        if !self.is_settling() {
            return Step::Idle;
        }
        if self.settle.update(now) {
            return Step::Running(*self.settle.get());
        }
        self.phase = TransitionPhase::Idle;
        Step::Settled {
            translation: *self.settle.get(),
            commit: self.pending.take(),
        }
    }

    /// Jumps a running animation to its end.
    pub fn finish(&mut self) -> Option<Halted> {
        if !self.is_settling() {
            return None;
        }
        let target = *self.settle.target();
        self.settle.snap_to(target);
        self.phase = TransitionPhase::Idle;
        Some(Halted {
            translation: target,
            commit: self.pending.take(),
        })
    }

    /// Halts a running animation at the last ticked value. A commit that
    /// was in flight counts as done: its index is already in place.
    pub fn interrupt(&mut self) -> Option<Halted> {
        if !self.is_settling() {
            return None;
        }
        let translation = self.settle.stop();
        self.phase = TransitionPhase::Idle;
        Some(Halted {
            translation,
            commit: self.pending.take(),
        })
    }

    /// Back to `Idle`, dropping any drag or animation state.
    pub fn reset(&mut self) {
        let at = *self.settle.get();
        self.settle.snap_to(at);
        self.phase = TransitionPhase::Idle;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabswipe_core::Easing;
    use web_time::Duration;

    fn input(velocity_x: f32, translation_x: f32) -> ReleaseInput {
        ReleaseInput {
            velocity_x,
            translation_x,
            baseline: -100.0,
            slot_width: 100.0,
            neighbors: ScreenNeighbors {
                left: Some(0),
                right: Some(2),
            },
        }
    }

    fn decide(i: ReleaseInput) -> ReleaseDecision {
        TransitionCommitter::decide(&i, &EngineConfig::default(), |_| true)
    }

    #[test]
    fn ratio_threshold() {
        assert_eq!(
            decide(input(-80.0, -180.0)),
            ReleaseDecision::Commit {
                to: 2,
                rule: CommitRule::Translation
            }
        );
        assert_eq!(decide(input(-70.0, -170.0)), ReleaseDecision::SnapBack);
        assert_eq!(
            decide(input(30.0, -20.0)),
            ReleaseDecision::Commit {
                to: 0,
                rule: CommitRule::Translation
            }
        );
    }

    #[test]
    fn velocity_beats_distance() {
        assert_eq!(
            decide(input(-700.0, -110.0)),
            ReleaseDecision::Commit {
                to: 2,
                rule: CommitRule::Velocity
            }
        );
        assert_eq!(decide(input(-499.0, -110.0)), ReleaseDecision::SnapBack);
    }

    #[test]
    fn missing_neighbour_falls_through() {
        let mut i = input(-900.0, -190.0);
        i.neighbors.right = None;
        assert_eq!(decide(i), ReleaseDecision::SnapBack);
    }

    #[test]
    fn vetoed_neighbour_falls_through() {
        let d = TransitionCommitter::decide(
            &input(-900.0, -190.0),
            &EngineConfig::default(),
            |to| to != 2,
        );
        assert_eq!(d, ReleaseDecision::SnapBack);
    }

    #[test]
    fn zero_width_never_commits_on_distance() {
        let mut i = input(0.0, -50.0);
        i.slot_width = 0.0;
        assert_eq!(decide(i), ReleaseDecision::SnapBack);
    }

    #[test]
    fn commit_settles_and_reports() {
        let t0 = Instant::now();
        let mut c = TransitionCommitter::new(AnimationSpec::tween(
            Duration::from_millis(100),
            Easing::Linear,
        ));
        c.begin_drag();
        c.commit(PendingCommit { from: 1, to: 2 }, -180.0, -200.0, Some(t0));
        assert_eq!(c.phase(), TransitionPhase::Committing);

        assert_eq!(
            c.tick(t0 + Duration::from_millis(50)),
            Step::Running(-190.0)
        );
        assert_eq!(
            c.tick(t0 + Duration::from_millis(100)),
            Step::Settled {
                translation: -200.0,
                commit: Some(PendingCommit { from: 1, to: 2 })
            }
        );
        assert_eq!(c.phase(), TransitionPhase::Idle);
        assert_eq!(c.tick(t0 + Duration::from_millis(200)), Step::Idle);
    }

    #[test]
    fn interrupt_keeps_last_frame() {
        let t0 = Instant::now();
        let mut c = TransitionCommitter::new(AnimationSpec::tween(
            Duration::from_millis(100),
            Easing::Linear,
        ));
        c.snap_back(-40.0, 0.0, Some(t0));
        c.tick(t0 + Duration::from_millis(25));
        let halted = c.interrupt().unwrap();
        assert_eq!(halted.translation, -30.0);
        assert_eq!(halted.commit, None);
        assert!(c.interrupt().is_none());
    }

    #[test]
    fn snap_back_in_place_is_immediate() {
        let mut c = TransitionCommitter::new(AnimationSpec::default());
        c.snap_back(-100.0, -100.0, None);
        assert_eq!(c.phase(), TransitionPhase::Idle);
    }
}
