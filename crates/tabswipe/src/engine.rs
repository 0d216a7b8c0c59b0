use smallvec::SmallVec;
use tabswipe_core::{
    ConfigError, FlowDirection, InputEvent, LayoutContext, ListenerId, Listeners, PointerAction,
    Vec2,
};
use web_time::Instant;

use crate::clamp::{BoundaryClamper, ClampContext};
use crate::commit::{
    Halted, PendingCommit, ReleaseDecision, ReleaseInput, Step, TransitionCommitter,
    TransitionPhase,
};
use crate::config::EngineConfig;
use crate::gestures::{DirectionVerdict, GestureTracker};
use crate::negotiate::{SelectionChanging, SelectionNegotiator};
use crate::position::{PositionModel, TabSlot};
use crate::virtualize::{ContentFactory, Materialized, VirtualizationLoader};

/// Fired once a selection change has settled.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChanged<H> {
    /// `None` when the collection was empty before.
    pub old_index: Option<usize>,
    pub new_index: usize,
    pub old_content: Option<H>,
    pub new_content: Option<H>,
}

#[derive(Clone, Copy, Debug)]
struct DragSession {
    origin: usize,
    direction: DirectionVerdict,
}

/// The swipeable content strip of a tab control.
///
/// All input arrives through [`TabContentEngine::dispatch`]; the host steps
/// settle animations with [`TabContentEngine::tick`] and reads
/// [`TabContentEngine::translation_x`] to position the strip.
pub struct TabContentEngine<F: ContentFactory> {
    config: EngineConfig,
    model: PositionModel<F::Handle>,
    loader: VirtualizationLoader<F>,
    tracker: GestureTracker,
    negotiator: SelectionNegotiator,
    committer: TransitionCommitter,
    changed: Listeners<SelectionChanged<F::Handle>>,
    session: Option<DragSession>,
}

impl<F> TabContentEngine<F>
where
    F: ContentFactory,
    F::Handle: 'static,
{
    /// Creates an engine with `slot_count` visible slots, the first one
    /// selected. Geometry stays degenerate until the host supplies a layout.
    pub fn new(factory: F, slot_count: usize, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self {
            config,
            model: PositionModel::new(slot_count, LayoutContext::default()),
            loader: VirtualizationLoader::new(factory, config.enable_virtualization),
            tracker: GestureTracker::new(),
            negotiator: SelectionNegotiator::new(),
            committer: TransitionCommitter::new(config.transition),
            changed: Listeners::new(),
            session: None,
        };
        if !engine.loader.is_enabled() {
            engine.loader.materialize_all(engine.model.slots_mut());
        }
        engine.ensure_selected();
        Ok(engine)
    }

    pub fn with_layout(mut self, layout: LayoutContext) -> Self {
        self.set_layout(layout);
        self
    }

    // ---------------------------------------------------------------------
    // Read side
    // ---------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn layout(&self) -> LayoutContext {
        self.model.layout()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.model.selected_index()
    }

    pub fn translation_x(&self) -> f32 {
        self.model.translation_x()
    }

    /// Resting translation of the current selection.
    pub fn baseline(&self) -> f32 {
        self.model.baseline()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.committer.phase()
    }

    pub fn is_pressed(&self) -> bool {
        self.tracker.is_pressed()
    }

    /// Direction of the drag in progress, `Undetermined` otherwise.
    pub fn direction(&self) -> DirectionVerdict {
        self.session.map(|s| s.direction).unwrap_or_default()
    }

    pub fn slot_count(&self) -> usize {
        self.model.slot_count()
    }

    pub fn visible_slot_count(&self) -> usize {
        self.model.visible_slot_count()
    }

    pub fn slots(&self) -> &[TabSlot<F::Handle>] {
        self.model.slots()
    }

    pub fn slot(&self, index: usize) -> Option<&TabSlot<F::Handle>> {
        self.model.slot(index)
    }

    pub fn content(&self, index: usize) -> Option<&F::Handle> {
        self.model.slot(index).and_then(|s| s.content().handle())
    }

    pub fn materialized_count(&self) -> usize {
        VirtualizationLoader::<F>::materialized_count(self.model.slots())
    }

    pub fn model(&self) -> &PositionModel<F::Handle> {
        &self.model
    }

    pub fn factory(&self) -> &F {
        self.loader.factory()
    }

    pub fn factory_mut(&mut self) -> &mut F {
        self.loader.factory_mut()
    }

    // ---------------------------------------------------------------------
    // Listeners
    // ---------------------------------------------------------------------

    pub fn on_selection_changing(
        &mut self,
        f: impl FnMut(&mut SelectionChanging) + 'static,
    ) -> ListenerId {
        self.negotiator.subscribe(f)
    }

    pub fn remove_changing_listener(&mut self, id: ListenerId) -> bool {
        self.negotiator.unsubscribe(id)
    }

    pub fn on_selection_changed(
        &mut self,
        mut f: impl FnMut(&SelectionChanged<F::Handle>) + 'static,
    ) -> ListenerId {
        self.changed.subscribe(move |ev| f(ev))
    }

    pub fn remove_changed_listener(&mut self, id: ListenerId) -> bool {
        self.changed.unsubscribe(id)
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    pub fn dispatch(&mut self, event: InputEvent) {
        match event.action {
            PointerAction::Pressed => self.on_press(event.point, event.timestamp),
            PointerAction::Moved => self.on_move(event.point, event.timestamp),
            PointerAction::Released => self.on_release(event.point, event.timestamp),
            PointerAction::Cancelled => self.on_cancel(event.timestamp),
        }
    }

    pub fn on_press(&mut self, point: Vec2, time: Instant) {
        if self.tracker.is_pressed() {
            log::debug!(
                "gesture: ignoring press at {:.1}, one is already active",
                point.x
            );
            return;
        }
        if self.model.is_degenerate() {
            log::trace!("gesture: ignoring press, nothing to swipe");
            return;
        }
        if let Some(halted) = self.committer.interrupt() {
            log::debug!("gesture: settle interrupted at {:.1}", halted.translation);
            self.apply_halt(halted);
        }
        let Some(origin) = self.model.selected_index() else {
            return;
        };

        self.tracker.on_press(point, time);
        self.negotiator.reset();
        self.session = Some(DragSession {
            origin,
            direction: DirectionVerdict::Undetermined,
        });
        log::debug!(
            "gesture: press at {:.1} on slot {origin} ({:?})",
            point.x,
            self.model.position_class(origin)
        );
    }

    pub fn on_move(&mut self, point: Vec2, time: Instant) {
        let Some(delta) = self.tracker.on_move(point, time) else {
            return;
        };
        if self.model.is_degenerate() {
            self.abort_gesture();
            return;
        }
        let Some(origin) = self.session.map(|s| s.origin) else {
            return;
        };

        if self.committer.phase() == TransitionPhase::Idle {
            self.committer.begin_drag();
            log::debug!("gesture: dragging from slot {origin}");
        }

        let ctx = self.clamp_context(origin);
        let next = BoundaryClamper::clamp(self.model.translation_x(), delta, &ctx);
        self.model.set_translation_x(next);
        log::trace!("gesture: delta {delta:.1} -> translation {next:.1}");

        self.update_direction(origin, next - ctx.baseline);
    }

    pub fn on_release(&mut self, point: Vec2, time: Instant) {
        let catch_up = self
            .tracker
            .state()
            .is_some_and(|s| s.is_moved && s.last_point.x != point.x);
        if catch_up {
            self.on_move(point, time);
        }

        let Some(state) = self.tracker.on_release(point, time) else {
            return;
        };
        let Some(session) = self.session.take() else {
            return;
        };
        let origin = session.origin;

        let dragged = state.is_moved && self.committer.phase() == TransitionPhase::Dragging;
        if !dragged || self.model.visible_slot_count() <= 1 {
            log::debug!("gesture: tap on slot {origin}");
            self.negotiator.reset();
            if self.model.translation_x() == self.model.baseline_for(origin) {
                if self.committer.phase() != TransitionPhase::Idle {
                    self.committer.reset();
                }
                return;
            }
            // A press that halted a settle left the strip mid-way.
            self.settle_back(origin, Some(time));
            return;
        }

        let input = ReleaseInput {
            velocity_x: state.velocity_x,
            translation_x: self.model.translation_x(),
            baseline: self.model.baseline_for(origin),
            slot_width: self.model.slot_width(),
            neighbors: self.model.screen_neighbors(origin),
        };
        let negotiator = &mut self.negotiator;
        let decision = TransitionCommitter::decide(&input, &self.config, |to| {
            negotiator.confirm(origin, to)
        });
        self.negotiator.reset();

        match decision {
            ReleaseDecision::Commit { to, rule } => {
                log::debug!(
                    "gesture: commit {origin} -> {to} by {rule:?} (v={:.0}, dx={:.1})",
                    input.velocity_x,
                    input.translation_x - input.baseline
                );
                self.commit_to(origin, to, Some(time));
            }
            ReleaseDecision::SnapBack => {
                log::debug!(
                    "gesture: snap back to {origin} (v={:.0}, dx={:.1})",
                    input.velocity_x,
                    input.translation_x - input.baseline
                );
                self.settle_back(origin, Some(time));
            }
        }
    }

    /// The platform took the pointer away. Never commits.
    pub fn on_cancel(&mut self, time: Instant) {
        if self.tracker.cancel().is_none() {
            return;
        }
        self.negotiator.reset();
        if let Some(session) = self.session.take() {
            log::debug!("gesture: cancelled on slot {}", session.origin);
            self.settle_back(session.origin, Some(time));
        }
    }

    /// Steps the settle animation. Returns true while it is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.committer.tick(now) {
            Step::Idle => false,
            Step::Running(x) => {
                self.model.set_translation_x(x);
                true
            }
            Step::Settled {
                translation,
                commit,
            } => {
                self.model.set_translation_x(translation);
                if let Some(c) = commit {
                    self.fire_changed(Some(c.from), c.to);
                }
                false
            }
        }
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Moves the selection like a committed swipe would: negotiated,
    /// animated from wherever the strip is, with the target and its
    /// neighbours materialized. Out-of-range or hidden targets resolve to
    /// the nearest visible slot. Ignored while a finger is down.
    pub fn set_selected_index(&mut self, index: usize) {
        let Some(target) = self
            .model
            .nearest_visible(index)
            .or_else(|| self.model.clamp_index(index))
        else {
            return;
        };
        if self.tracker.is_pressed() {
            log::debug!("selection: ignoring request for {index} during a gesture");
            return;
        }
        if let Some(halted) = self.committer.interrupt() {
            self.apply_halt(halted);
        }
        let Some(current) = self.model.selected_index() else {
            return;
        };
        if target == current {
            self.settle_back(current, None);
            return;
        }

        self.negotiator.reset();
        let allowed = self.negotiator.propose(current, target);
        self.negotiator.reset();
        if !allowed {
            self.settle_back(current, None);
            return;
        }

        let hood = self.neighborhood(target);
        self.loader.ensure_all(self.model.slots_mut(), &hood);
        self.commit_to(current, target, None);
        if self.model.is_degenerate() {
            self.finish_settle();
        }
    }

    // ---------------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------------

    pub fn set_slot_width(&mut self, width: f32) {
        self.set_layout(self.model.layout().with_slot_width(width));
    }

    pub fn set_flow_direction(&mut self, flow: FlowDirection) {
        self.set_layout(self.model.layout().with_flow(flow));
    }

    /// Recomputes every baseline. A drag in progress keeps its displacement
    /// (scaled to the new width, mirrored on a flow flip) and is re-clamped
    /// in place; a settle animation jumps to its end.
    pub fn set_layout(&mut self, layout: LayoutContext) {
        let old = self.model.layout();
        if old == layout {
            return;
        }
        let offset = self.model.translation_x() - self.model.baseline();
        self.model.set_layout(layout);
        log::debug!(
            "layout: width {:.1} -> {:.1}, flow {:?} -> {:?}",
            old.slot_width,
            layout.slot_width,
            old.flow,
            layout.flow
        );

        if self.model.is_degenerate() {
            self.finish_settle();
            self.abort_gesture();
            return;
        }

        if self.tracker.is_pressed()
            && let Some(session) = self.session
        {
            let scale = if old.usable_width() > 0.0 {
                layout.usable_width() / old.usable_width()
            } else {
                0.0
            };
            let mirror = if old.flow != layout.flow { -1.0 } else { 1.0 };
            let ctx = self.clamp_context(session.origin);
            let x = BoundaryClamper::clamp(ctx.baseline, offset * scale * mirror, &ctx);
            self.model.set_translation_x(x);
            self.update_direction(session.origin, x - ctx.baseline);
            return;
        }

        self.finish_settle();
        self.rest();
    }

    // ---------------------------------------------------------------------
    // Slot collection
    // ---------------------------------------------------------------------

    pub fn push_slot(&mut self) -> usize {
        self.insert_slot(self.model.slot_count())
    }

    /// Inserts a visible slot; the current selection stays on the same tab.
    /// Returns the index actually used (clamped to the end).
    pub fn insert_slot(&mut self, index: usize) -> usize {
        self.settle_for_edit();
        let previous = self.model.selected_index();
        let at = self.model.insert_slot(index);

        match previous {
            Some(s) if s >= at => self.model.set_selected(Some(s + 1)),
            Some(_) => {}
            None => self.model.set_selected(Some(at)),
        }
        if !self.loader.is_enabled() {
            self.loader.ensure_materialized(self.model.slots_mut(), at);
        }
        self.ensure_selected();
        self.rest();
        if previous.is_none() {
            self.fire_changed(None, at);
        }
        at
    }

    /// Removes a slot and disposes its content. If it was selected, the
    /// selection moves to the nearest visible slot at the same position.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if index >= self.model.slot_count() {
            return false;
        }
        self.settle_for_edit();
        let previous = self.model.selected_index();
        let Some(slot) = self.model.remove_slot(index) else {
            return false;
        };
        self.loader.discard(slot);

        let mut moved_from = None;
        match previous {
            Some(s) if s > index => self.model.set_selected(Some(s - 1)),
            Some(s) if s == index => {
                let next = self
                    .model
                    .nearest_visible(index)
                    .or_else(|| self.model.clamp_index(index));
                self.model.set_selected(next);
                moved_from = Some(s);
            }
            _ => {}
        }
        self.ensure_selected();
        self.rest();

        if let (Some(old), Some(new)) = (moved_from, self.model.selected_index()) {
            self.fire_changed_with(Some(old), None, new);
        }
        true
    }

    /// Shows or hides a slot. Hiding the selected slot moves the selection
    /// to the nearest visible one.
    pub fn set_slot_visible(&mut self, index: usize, visible: bool) -> bool {
        self.settle_for_edit();
        if !self.model.set_visible(index, visible) {
            return false;
        }

        let mut moved = None;
        if let Some(s) = self.model.selected_index()
            && self.model.slot(s).is_some_and(|slot| !slot.is_visible())
            && let Some(n) = self.model.nearest_visible(s)
        {
            self.model.set_selected(Some(n));
            moved = Some((s, n));
        }
        self.ensure_selected();
        self.rest();

        if let Some((old, new)) = moved {
            self.fire_changed(Some(old), new);
        }
        true
    }

    // ---------------------------------------------------------------------
    // Configuration and virtualization
    // ---------------------------------------------------------------------

    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.committer.set_spec(config.transition);
        self.loader.set_enabled(config.enable_virtualization);
        if !config.enable_virtualization {
            self.loader.materialize_all(self.model.slots_mut());
        }
        self.config = config;
        Ok(())
    }

    /// Idempotent; out-of-range indices are clamped.
    pub fn ensure_materialized(&mut self, index: usize) -> Materialized {
        self.loader
            .ensure_materialized(self.model.slots_mut(), index)
    }

    /// Host-driven release of a slot's content. The selected slot and the
    /// eager (non-virtualized) mode keep their content.
    pub fn dematerialize(&mut self, index: usize) -> bool {
        if !self.loader.is_enabled() || self.model.selected_index() == Some(index) {
            return false;
        }
        self.loader.dematerialize(self.model.slots_mut(), index)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn clamp_context(&self, origin: usize) -> ClampContext {
        ClampContext {
            baseline: self.model.baseline_for(origin),
            layout: self.model.layout(),
            class: self.model.position_class(origin),
            neighbors: self.model.neighbors(origin),
        }
    }

    // Negotiates and pre-loads the neighbour a new verdict points at.
    fn update_direction(&mut self, origin: usize, displacement: f32) {
        let verdict = DirectionVerdict::from_displacement(displacement);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.direction == verdict {
            return;
        }
        session.direction = verdict;
        log::trace!("gesture: direction now {verdict:?}");

        let Some(neighbor) = self.model.screen_neighbors(origin).toward(verdict) else {
            return;
        };
        if self.negotiator.propose(origin, neighbor) {
            self.loader
                .ensure_materialized(self.model.slots_mut(), neighbor);
        }
    }

    fn commit_to(&mut self, from: usize, to: usize, now: Option<Instant>) {
        self.model.set_selected(Some(to));
        self.loader.ensure_materialized(self.model.slots_mut(), to);
        let target = self.model.baseline_for(to);
        self.committer.commit(
            PendingCommit { from, to },
            self.model.translation_x(),
            target,
            now,
        );
        if let Some(now) = now {
            self.tick(now);
        }
    }

    fn settle_back(&mut self, origin: usize, now: Option<Instant>) {
        let target = self.model.baseline_for(origin);
        self.committer
            .snap_back(self.model.translation_x(), target, now);
        if let Some(now) = now {
            self.tick(now);
        }
    }

    fn apply_halt(&mut self, halted: Halted) {
        self.model.set_translation_x(halted.translation);
        if let Some(c) = halted.commit {
            self.fire_changed(Some(c.from), c.to);
        }
    }

    fn finish_settle(&mut self) {
        if let Some(done) = self.committer.finish() {
            self.apply_halt(done);
        }
    }

    fn abort_gesture(&mut self) {
        if self.tracker.cancel().is_some() {
            log::debug!("gesture: aborted");
        }
        self.session = None;
        self.negotiator.reset();
        self.committer.reset();
        self.rest();
    }

    // Structural edits never happen under a finger or mid-animation.
    fn settle_for_edit(&mut self) {
        self.finish_settle();
        self.abort_gesture();
    }

    fn rest(&mut self) {
        self.model.set_translation_x(self.model.baseline());
    }

    fn ensure_selected(&mut self) {
        if let Some(s) = self.model.selected_index() {
            self.loader.ensure_materialized(self.model.slots_mut(), s);
        }
    }

    fn neighborhood(&self, index: usize) -> SmallVec<[usize; 3]> {
        let mut hood = SmallVec::new();
        hood.push(index);
        hood.extend(self.model.previous_visible(index));
        hood.extend(self.model.next_visible(index));
        hood
    }

    fn fire_changed(&mut self, old_index: Option<usize>, new_index: usize) {
        let old_content = old_index.and_then(|i| self.content(i).cloned());
        self.fire_changed_with(old_index, old_content, new_index);
    }

    fn fire_changed_with(
        &mut self,
        old_index: Option<usize>,
        old_content: Option<F::Handle>,
        new_index: usize,
    ) {
        log::debug!("selection: {old_index:?} -> {new_index}");
        let mut ev = SelectionChanged {
            old_index,
            new_index,
            old_content,
            new_content: self.content(new_index).cloned(),
        };
        self.changed.dispatch(&mut ev);
    }
}
