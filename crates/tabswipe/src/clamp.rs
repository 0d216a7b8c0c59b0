//! Legal translation range for an in-progress drag.
//!
//! The strip may travel at most one slot width past its baseline, and only
//! towards a side that actually has a visible neighbour. Which screen side
//! holds the *next* slot depends on the flow direction: in LTR the next slot
//! is revealed by moving the strip towards negative x, in RTL towards
//! positive x. Every rule below is expressed through
//! [`FlowDirection::forward_sign`] so the RTL case is an exact mirror.

use tabswipe_core::{FlowDirection, LayoutContext, Span};

/// Where the selected slot sits among the visible slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionClass {
    First,
    Interior,
    Last,
    /// The single visible slot; nothing to swipe to.
    Only,
}

impl PositionClass {
    pub fn from_neighbors(n: NeighborVisibility) -> Self {
        match (n.previous, n.next) {
            (false, false) => PositionClass::Only,
            (false, true) => PositionClass::First,
            (true, false) => PositionClass::Last,
            (true, true) => PositionClass::Interior,
        }
    }

    fn allows_previous(self) -> bool {
        matches!(self, PositionClass::Interior | PositionClass::Last)
    }

    fn allows_next(self) -> bool {
        matches!(self, PositionClass::Interior | PositionClass::First)
    }
}

/// Whether the logical previous/next slots exist and are visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborVisibility {
    pub previous: bool,
    pub next: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampContext {
    pub baseline: f32,
    pub layout: LayoutContext,
    pub class: PositionClass,
    pub neighbors: NeighborVisibility,
}

impl ClampContext {
    /// The same drag seen under the opposite flow direction.
    pub fn mirrored(self) -> Self {
        Self {
            baseline: -self.baseline,
            layout: self.layout.with_flow(self.layout.flow.flipped()),
            ..self
        }
    }
}

pub struct BoundaryClamper;

impl BoundaryClamper {
    pub fn range(ctx: &ClampContext) -> Span {
        let width = ctx.layout.usable_width();
        let forward = ctx.layout.flow.forward_sign();

        let next_reach = if ctx.class.allows_next() && ctx.neighbors.next {
            width
        } else {
            0.0
        };
        let previous_reach = if ctx.class.allows_previous() && ctx.neighbors.previous {
            width
        } else {
            0.0
        };

        Span::new(
            ctx.baseline + forward * next_reach,
            ctx.baseline - forward * previous_reach,
        )
    }

    /// Applies `delta` to `current` and clamps the result into the legal
    /// range. A `current` already outside the range (e.g. after a resize) is
    /// pulled back in.
    pub fn clamp(current: f32, delta: f32, ctx: &ClampContext) -> f32 {
        let candidate = current + delta;
        if !candidate.is_finite() {
            return ctx.baseline;
        }
        Self::range(ctx).clamp(candidate)
    }

    /// Convenience for callers that only know the flow as a flag.
    pub fn clamp_flagged(
        current: f32,
        delta: f32,
        baseline: f32,
        slot_width: f32,
        class: PositionClass,
        right_to_left: bool,
        neighbors: NeighborVisibility,
    ) -> f32 {
        let flow = if right_to_left {
            FlowDirection::Rtl
        } else {
            FlowDirection::Ltr
        };
        Self::clamp(
            current,
            delta,
            &ClampContext {
                baseline,
                layout: LayoutContext::new(slot_width, flow),
                class,
                neighbors,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: NeighborVisibility = NeighborVisibility {
        previous: true,
        next: true,
    };

    fn ctx(baseline: f32, class: PositionClass, flow: FlowDirection) -> ClampContext {
        ClampContext {
            baseline,
            layout: LayoutContext::new(100.0, flow),
            class,
            neighbors: BOTH,
        }
    }

    #[test]
    fn first_slot_cannot_reveal_previous() {
        let c = ctx(0.0, PositionClass::First, FlowDirection::Ltr);
        assert_eq!(BoundaryClamper::clamp(0.0, 40.0, &c), 0.0);
        assert_eq!(BoundaryClamper::clamp(0.0, -40.0, &c), -40.0);
        assert_eq!(BoundaryClamper::clamp(0.0, -400.0, &c), -100.0);
    }

    #[test]
    fn last_slot_cannot_reveal_next() {
        let c = ctx(-200.0, PositionClass::Last, FlowDirection::Ltr);
        assert_eq!(BoundaryClamper::clamp(-200.0, -30.0, &c), -200.0);
        assert_eq!(BoundaryClamper::clamp(-200.0, 130.0, &c), -100.0);
    }

    #[test]
    fn interior_collapses_to_visible_side() {
        let mut c = ctx(-100.0, PositionClass::Interior, FlowDirection::Ltr);
        assert_eq!(BoundaryClamper::range(&c), Span::new(-200.0, 0.0));

        c.neighbors.next = false;
        assert_eq!(BoundaryClamper::range(&c), Span::new(-100.0, 0.0));

        c.neighbors.previous = false;
        assert_eq!(BoundaryClamper::range(&c), Span::point(-100.0));
    }

    #[test]
    fn only_slot_is_pinned() {
        let c = ctx(0.0, PositionClass::Only, FlowDirection::Ltr);
        assert_eq!(BoundaryClamper::clamp(0.0, 55.0, &c), 0.0);
        assert_eq!(BoundaryClamper::clamp(0.0, -55.0, &c), 0.0);
    }

    #[test]
    fn rtl_first_slot_reveals_next_towards_positive() {
        let c = ctx(0.0, PositionClass::First, FlowDirection::Rtl);
        assert_eq!(BoundaryClamper::clamp(0.0, 60.0, &c), 60.0);
        assert_eq!(BoundaryClamper::clamp(0.0, -60.0, &c), 0.0);
    }

    #[test]
    fn symmetric_under_flow_flip() {
        let classes = [
            PositionClass::First,
            PositionClass::Interior,
            PositionClass::Last,
            PositionClass::Only,
        ];
        for class in classes {
            for baseline in [0.0f32, -100.0, -300.0] {
                let c = ctx(baseline, class, FlowDirection::Ltr);
                let m = c.mirrored();
                let moves = [
                    (baseline, 35.0),
                    (baseline - 20.0, -90.0),
                    (baseline, 250.0),
                ];
                for (current, delta) in moves {
                    let a = BoundaryClamper::clamp(current, delta, &c);
                    let b = BoundaryClamper::clamp(-current, -delta, &m);
                    assert_eq!(a, -b, "{class:?} baseline={baseline} delta={delta}");
                }
            }
        }
    }

    #[test]
    fn non_finite_input_returns_baseline() {
        let c = ctx(-100.0, PositionClass::Interior, FlowDirection::Ltr);
        assert_eq!(BoundaryClamper::clamp(-100.0, f32::NAN, &c), -100.0);
    }

    #[test]
    fn flagged_variant_matches() {
        let v = BoundaryClamper::clamp_flagged(
            0.0,
            70.0,
            0.0,
            100.0,
            PositionClass::First,
            true,
            BOTH,
        );
        assert_eq!(v, 70.0);
    }
}
