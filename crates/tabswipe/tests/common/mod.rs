#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use tabswipe::*;
use tabswipe_core::*;
use web_time::{Duration, Instant};

/// Content factory that records what it built and what it disposed.
#[derive(Default)]
pub struct Pages {
    pub created: Rc<RefCell<Vec<usize>>>,
    pub disposed: Rc<RefCell<Vec<usize>>>,
    pub fail_on: Option<usize>,
}

impl ContentFactory for Pages {
    type Handle = Rc<String>;

    fn create(&mut self, index: usize) -> Result<Rc<String>, ContentError> {
        if self.fail_on == Some(index) {
            return Err(ContentError::failed(index, "template missing"));
        }
        self.created.borrow_mut().push(index);
        Ok(Rc::new(format!("page-{index}")))
    }

    fn dispose(&mut self, index: usize, _handle: Rc<String>) {
        self.disposed.borrow_mut().push(index);
    }
}

pub fn linear_config() -> EngineConfig {
    EngineConfig::default()
        .with_transition(Duration::from_millis(100), Easing::Linear)
}

pub fn engine(slots: usize, flow: FlowDirection) -> TabContentEngine<Pages> {
    engine_with(Pages::default(), slots, flow)
}

pub fn engine_with(pages: Pages, slots: usize, flow: FlowDirection) -> TabContentEngine<Pages> {
    let _ = env_logger::builder().is_test(true).try_init();
    TabContentEngine::new(pages, slots, linear_config())
        .expect("valid config")
        .with_layout(LayoutContext::new(100.0, flow))
}

pub fn created(e: &TabContentEngine<Pages>) -> Vec<usize> {
    e.factory().created.borrow().clone()
}

/// Monotonic test time, advanced explicitly.
pub struct Timeline {
    now: Instant,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn advance(&mut self, ms: u64) -> Instant {
        self.now += Duration::from_millis(ms);
        self.now
    }
}

/// Press at `from`, one move to `to` after `ms`, release at `to`.
pub fn swipe(e: &mut TabContentEngine<Pages>, tl: &mut Timeline, from: f32, to: f32, ms: u64) {
    e.dispatch(InputEvent::pressed(from, tl.now()));
    let t = tl.advance(ms);
    e.dispatch(InputEvent::moved(to, t));
    e.dispatch(InputEvent::released(to, t));
}

/// Runs any settle animation to completion.
pub fn settle(e: &mut TabContentEngine<Pages>, tl: &mut Timeline) {
    let t = tl.advance(1_000);
    e.tick(t);
    assert_eq!(e.phase(), TransitionPhase::Idle);
}

/// Selects `index` programmatically and settles.
pub fn select(e: &mut TabContentEngine<Pages>, tl: &mut Timeline, index: usize) {
    e.set_selected_index(index);
    e.tick(tl.now());
    settle(e, tl);
    assert_eq!(e.selected_index(), Some(index));
}
