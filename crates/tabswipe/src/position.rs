use tabswipe_core::{FlowDirection, LayoutContext};

use crate::clamp::{NeighborVisibility, PositionClass};
use crate::gestures::DirectionVerdict;

/// What a slot currently owns. Exactly one representation at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotContent<H> {
    Placeholder,
    Materialized(H),
}

impl<H> Default for SlotContent<H> {
    fn default() -> Self {
        SlotContent::Placeholder
    }
}

impl<H> SlotContent<H> {
    pub fn is_materialized(&self) -> bool {
        matches!(self, SlotContent::Materialized(_))
    }

    pub fn handle(&self) -> Option<&H> {
        match self {
            SlotContent::Materialized(h) => Some(h),
            SlotContent::Placeholder => None,
        }
    }

    /// Leaves a placeholder behind and hands the old content to the caller.
    pub(crate) fn take(&mut self) -> Option<H> {
        match std::mem::replace(self, SlotContent::Placeholder) {
            SlotContent::Materialized(h) => Some(h),
            SlotContent::Placeholder => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TabSlot<H> {
    pub(crate) index: usize,
    pub(crate) visible: bool,
    pub(crate) content: SlotContent<H>,
}

impl<H> TabSlot<H> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            visible: true,
            content: SlotContent::Placeholder,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> &SlotContent<H> {
        &self.content
    }

    pub fn is_materialized(&self) -> bool {
        self.content.is_materialized()
    }
}

/// Neighbours of a slot by screen side rather than by logical order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenNeighbors {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl ScreenNeighbors {
    pub fn toward(&self, direction: DirectionVerdict) -> Option<usize> {
        match direction {
            DirectionVerdict::TowardLeft => self.left,
            DirectionVerdict::TowardRight => self.right,
            DirectionVerdict::Undetermined => None,
        }
    }
}

/// Slots, selection and the strip's translation.
///
/// At rest `translation_x` equals [`PositionModel::baseline`]; only a drag
/// or a settle animation moves it elsewhere.
#[derive(Debug)]
pub struct PositionModel<H> {
    slots: Vec<TabSlot<H>>,
    selected: Option<usize>,
    layout: LayoutContext,
    translation_x: f32,
}

impl<H> PositionModel<H> {
    pub fn new(slot_count: usize, layout: LayoutContext) -> Self {
        let mut model = Self {
            slots: (0..slot_count).map(TabSlot::new).collect(),
            selected: (slot_count > 0).then_some(0),
            layout,
            translation_x: 0.0,
        };
        model.translation_x = model.baseline();
        model
    }

    pub fn slots(&self) -> &[TabSlot<H>] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [TabSlot<H>] {
        &mut self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&TabSlot<H>> {
        self.slots.get(index)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn visible_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.visible).count()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn layout(&self) -> LayoutContext {
        self.layout
    }

    pub(crate) fn set_layout(&mut self, layout: LayoutContext) {
        self.layout = layout;
    }

    pub fn slot_width(&self) -> f32 {
        self.layout.usable_width()
    }

    pub fn flow(&self) -> FlowDirection {
        self.layout.flow
    }

    pub fn translation_x(&self) -> f32 {
        self.translation_x
    }

    pub(crate) fn set_translation_x(&mut self, x: f32) {
        self.translation_x = x;
    }

    /// No gesture can run: zero width, nothing visible, or nothing selected.
    pub fn is_degenerate(&self) -> bool {
        self.layout.is_degenerate() || self.selected.is_none() || self.visible_slot_count() == 0
    }

    /// Clamps a possibly stale index into range. `None` only when empty.
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        if self.slots.is_empty() {
            None
        } else {
            Some(index.min(self.slots.len() - 1))
        }
    }

    /// Number of visible slots before `index`.
    pub fn visible_position(&self, index: usize) -> usize {
        self.slots
            .iter()
            .take(index)
            .filter(|s| s.visible)
            .count()
    }

    pub fn baseline_for(&self, index: usize) -> f32 {
        self.layout.baseline(self.visible_position(index))
    }

    /// Resting translation of the current selection (0 with no selection).
    pub fn baseline(&self) -> f32 {
        self.selected.map_or(0.0, |i| self.baseline_for(i))
    }

    pub fn next_visible(&self, index: usize) -> Option<usize> {
        self.slots
            .iter()
            .skip(index + 1)
            .find(|s| s.visible)
            .map(|s| s.index)
    }

    pub fn previous_visible(&self, index: usize) -> Option<usize> {
        self.slots
            .iter()
            .take(index)
            .rev()
            .find(|s| s.visible)
            .map(|s| s.index)
    }

    /// Closest visible slot to `index`, preferring later slots on ties.
    pub fn nearest_visible(&self, index: usize) -> Option<usize> {
        let index = self.clamp_index(index)?;
        if self.slots[index].visible {
            return Some(index);
        }
        match (self.previous_visible(index), self.next_visible(index)) {
            (Some(p), Some(n)) => Some(if index - p < n - index { p } else { n }),
            (p, n) => n.or(p),
        }
    }

    pub fn neighbors(&self, index: usize) -> NeighborVisibility {
        NeighborVisibility {
            previous: self.previous_visible(index).is_some(),
            next: self.next_visible(index).is_some(),
        }
    }

    pub fn position_class(&self, index: usize) -> PositionClass {
        PositionClass::from_neighbors(self.neighbors(index))
    }

    /// Logical neighbours mapped onto screen sides for the current flow.
    pub fn screen_neighbors(&self, index: usize) -> ScreenNeighbors {
        let previous = self.previous_visible(index);
        let next = self.next_visible(index);
        match self.layout.flow {
            FlowDirection::Ltr => ScreenNeighbors {
                left: previous,
                right: next,
            },
            FlowDirection::Rtl => ScreenNeighbors {
                left: next,
                right: previous,
            },
        }
    }

    pub(crate) fn insert_slot(&mut self, index: usize) -> usize {
        let index = index.min(self.slots.len());
        self.slots.insert(index, TabSlot::new(index));
        self.reindex();
        index
    }

    pub(crate) fn remove_slot(&mut self, index: usize) -> Option<TabSlot<H>> {
        if index >= self.slots.len() {
            return None;
        }
        let slot = self.slots.remove(index);
        self.reindex();
        Some(slot)
    }

    pub(crate) fn set_visible(&mut self, index: usize, visible: bool) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.visible != visible => {
                slot.visible = visible;
                true
            }
            _ => false,
        }
    }

    fn reindex(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.index = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(n: usize, flow: FlowDirection) -> PositionModel<u32> {
        PositionModel::new(n, LayoutContext::new(100.0, flow))
    }

    #[test]
    fn starts_on_first_slot_at_rest() {
        let m = model(3, FlowDirection::Ltr);
        assert_eq!(m.selected_index(), Some(0));
        assert_eq!(m.translation_x(), 0.0);
        assert_eq!(m.visible_slot_count(), 3);
    }

    #[test]
    fn empty_model_has_no_selection() {
        let m = model(0, FlowDirection::Ltr);
        assert_eq!(m.selected_index(), None);
        assert!(m.is_degenerate());
        assert_eq!(m.clamp_index(4), None);
    }

    #[test]
    fn hidden_slots_do_not_take_space() {
        let mut m = model(4, FlowDirection::Ltr);
        m.set_visible(1, false);
        assert_eq!(m.visible_position(3), 2);
        assert_eq!(m.baseline_for(3), -200.0);
        assert_eq!(m.next_visible(0), Some(2));
        assert_eq!(m.previous_visible(2), Some(0));
    }

    #[test]
    fn position_classes() {
        let mut m = model(3, FlowDirection::Ltr);
        assert_eq!(m.position_class(0), PositionClass::First);
        assert_eq!(m.position_class(1), PositionClass::Interior);
        assert_eq!(m.position_class(2), PositionClass::Last);
        m.set_visible(2, false);
        m.set_visible(0, false);
        assert_eq!(m.position_class(1), PositionClass::Only);
    }

    #[test]
    fn screen_neighbors_follow_flow() {
        let ltr = model(3, FlowDirection::Ltr);
        let rtl = model(3, FlowDirection::Rtl);
        assert_eq!(ltr.screen_neighbors(1).right, Some(2));
        assert_eq!(rtl.screen_neighbors(1).right, Some(0));
        assert_eq!(
            rtl.screen_neighbors(1).toward(DirectionVerdict::TowardLeft),
            Some(2)
        );
    }

    #[test]
    fn nearest_visible_prefers_later_on_tie() {
        let mut m = model(5, FlowDirection::Ltr);
        m.set_visible(2, false);
        assert_eq!(m.nearest_visible(2), Some(3));
        m.set_visible(3, false);
        assert_eq!(m.nearest_visible(3), Some(4));
        assert_eq!(m.nearest_visible(99), Some(4));
    }

    #[test]
    fn insert_and_remove_reindex() {
        let mut m = model(2, FlowDirection::Ltr);
        m.insert_slot(0);
        assert_eq!(
            m.slots().iter().map(|s| s.index()).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        let removed = m.remove_slot(1).map(|s| s.index());
        assert_eq!(removed, Some(1));
        assert_eq!(m.slot_count(), 2);
        assert_eq!(m.slot(1).map(|s| s.index()), Some(1));
        assert!(m.remove_slot(7).is_none());
    }
}
