//! # Layout context
//!
//! Everything geometric the engine needs from its host arrives through one
//! value, [`LayoutContext`]: the uniform slot width and the flow direction.
//! Baselines and clamp ranges are pure functions of it, so a host that
//! changes width or direction simply hands over a new context.
//!
//! ```rust
//! use tabswipe_core::*;
//!
//! let ltr = LayoutContext::new(100.0, FlowDirection::Ltr);
//! assert_eq!(ltr.baseline(2), -200.0);
//!
//! let rtl = ltr.with_flow(FlowDirection::Rtl);
//! assert_eq!(rtl.baseline(2), 200.0);
//! ```

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowDirection {
    #[default]
    Ltr,
    Rtl,
}

impl FlowDirection {
    pub fn flipped(self) -> Self {
        match self {
            FlowDirection::Ltr => FlowDirection::Rtl,
            FlowDirection::Rtl => FlowDirection::Ltr,
        }
    }

    /// Sign of the translation that moves the strip towards later slots:
    /// -1 in LTR (content slides left), +1 in RTL.
    pub fn forward_sign(self) -> f32 {
        match self {
            FlowDirection::Ltr => -1.0,
            FlowDirection::Rtl => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutContext {
    pub slot_width: f32,
    pub flow: FlowDirection,
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self {
            slot_width: 0.0,
            flow: FlowDirection::Ltr,
        }
    }
}

impl LayoutContext {
    pub fn new(slot_width: f32, flow: FlowDirection) -> Self {
        Self { slot_width, flow }
    }

    pub fn with_slot_width(self, slot_width: f32) -> Self {
        Self { slot_width, ..self }
    }

    pub fn with_flow(self, flow: FlowDirection) -> Self {
        Self { flow, ..self }
    }

    /// Width that can actually host a gesture. NaN and negative widths count
    /// as zero.
    pub fn usable_width(&self) -> f32 {
        if self.slot_width.is_finite() && self.slot_width > 0.0 {
            self.slot_width
        } else {
            0.0
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.usable_width() <= 0.0
    }

    /// Resting translation for the slot at `visible_position` among visible
    /// slots.
    pub fn baseline(&self, visible_position: usize) -> f32 {
        self.flow.forward_sign() * self.usable_width() * visible_position as f32
    }
}
