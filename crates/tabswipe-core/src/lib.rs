//! # Core vocabulary
//!
//! `tabswipe-core` holds the pieces of the tab-content engine that know
//! nothing about tabs:
//!
//! - [`Vec2`] / [`Span`]: points and closed x intervals.
//! - [`InputEvent`]: one normalized pointer sample (press, move, release,
//!   cancel) with its timestamp. Platform adapters produce these.
//! - [`LayoutContext`]: slot width plus [`FlowDirection`]. Passed
//!   explicitly wherever geometry is computed; there is no ambient state.
//! - [`animation`]: easing curves and [`AnimatedValue`], stepped by the
//!   caller's clock.
//! - [`Listeners`]: one typed listener list per notification.
//!
//! ## Listeners
//!
//! ```rust
//! use tabswipe_core::*;
//!
//! struct Changing {
//!     cancel: bool,
//! }
//!
//! let mut list: Listeners<Changing> = Listeners::new();
//! let id = list.subscribe(|ev| ev.cancel = true);
//!
//! let mut ev = Changing { cancel: false };
//! list.dispatch(&mut ev);
//! assert!(ev.cancel);
//!
//! assert!(list.unsubscribe(id));
//! assert!(list.is_empty());
//! ```
//!
//! ## Animation
//!
//! Animations never read a clock on their own. The host's frame scheduler
//! passes `now` into every step:
//!
//! ```rust
//! use tabswipe_core::animation::*;
//! use web_time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut x = AnimatedValue::new(
//!     0.0f32,
//!     AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
//! );
//! x.set_target(10.0, t0);
//! assert!(x.update(t0 + Duration::from_millis(50)));
//! assert!((*x.get() - 5.0).abs() < 0.01);
//! assert!(!x.update(t0 + Duration::from_millis(100)));
//! assert_eq!(*x.get(), 10.0);
//! ```

pub mod animation;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;

pub use animation::{AnimatedValue, AnimationSpec, Easing, Interpolate};
pub use dispatch::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use layout::*;
