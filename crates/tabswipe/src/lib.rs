//! # Swipeable tab content
//!
//! `tabswipe` is the horizontal content carrier of a tab control. It turns
//! normalized pointer input into committed or abandoned page transitions,
//! builds tab content lazily, and lets the host veto a tab switch before it
//! happens.
//!
//! The pieces, leaves first:
//!
//! - [`PositionModel`]: slots, selection, slot width and the strip's
//!   current translation.
//! - [`VirtualizationLoader`]: swaps placeholders for real content, built
//!   by the host's [`ContentFactory`].
//! - [`GestureTracker`]: press/move/release into deltas and velocity.
//! - [`BoundaryClamper`]: how far the strip may travel for the selected
//!   slot's [`PositionClass`] and flow direction.
//! - [`SelectionNegotiator`]: the cancelable [`SelectionChanging`] step.
//! - [`TransitionCommitter`]: commit or snap back at release, then settle.
//!
//! [`TabContentEngine`] wires them together.
//!
//! ## Driving the engine
//!
//! ```rust
//! use tabswipe::*;
//! use tabswipe_core::*;
//! use web_time::{Duration, Instant};
//!
//! let factory = FnFactory(|i: usize| Ok::<_, ContentError>(format!("page {i}")));
//! let mut tabs = TabContentEngine::new(factory, 3, EngineConfig::default())
//!     .unwrap()
//!     .with_layout(LayoutContext::new(100.0, FlowDirection::Ltr));
//!
//! // Drag 80 units to the left over a full second, then let go.
//! let t0 = Instant::now();
//! tabs.dispatch(InputEvent::pressed(300.0, t0));
//! tabs.dispatch(InputEvent::moved(220.0, t0 + Duration::from_secs(1)));
//! tabs.dispatch(InputEvent::released(220.0, t0 + Duration::from_secs(1)));
//!
//! assert_eq!(tabs.selected_index(), Some(1));
//! assert_eq!(tabs.phase(), TransitionPhase::Committing);
//!
//! // The host's frame scheduler steps the settle animation.
//! tabs.tick(t0 + Duration::from_secs(2));
//! assert_eq!(tabs.translation_x(), -100.0);
//! assert_eq!(tabs.content(1).map(String::as_str), Some("page 1"));
//! ```
//!
//! ## Vetoing a switch
//!
//! ```rust
//! # use tabswipe::*;
//! # use tabswipe_core::*;
//! let mut tabs = TabContentEngine::new(
//!     FnFactory(|i: usize| Ok::<_, ContentError>(i)),
//!     3,
//!     EngineConfig::default(),
//! )
//! .unwrap();
//! tabs.on_selection_changing(|ev| ev.cancel = ev.proposed_index == 2);
//!
//! tabs.set_selected_index(2);
//! assert_eq!(tabs.selected_index(), Some(0));
//! ```

pub mod clamp;
pub mod commit;
pub mod config;
pub mod engine;
pub mod gestures;
pub mod negotiate;
pub mod position;
pub mod virtualize;

pub use clamp::{BoundaryClamper, ClampContext, NeighborVisibility, PositionClass};
pub use commit::{
    CommitRule, PendingCommit, ReleaseDecision, ReleaseInput, TransitionCommitter,
    TransitionPhase,
};
pub use config::EngineConfig;
pub use engine::{SelectionChanged, TabContentEngine};
pub use gestures::{DirectionVerdict, GestureState, GestureTracker};
pub use negotiate::{SelectionChanging, SelectionNegotiator};
pub use position::{PositionModel, ScreenNeighbors, SlotContent, TabSlot};
pub use virtualize::{ContentFactory, FnFactory, Materialized, VirtualizationLoader};
