//! # Lazy tab content
//!
//! A slot starts out as a zero-cost placeholder. The first time the engine
//! needs its content (it becomes selected, or a drag starts revealing it) the
//! [`VirtualizationLoader`] asks the host's [`ContentFactory`] to build the
//! real thing and swaps it in at the same position.
//!
//! Materialized content is never released automatically: flicking back and
//! forth between tabs must not rebuild pages. Hosts that need the memory back
//! call [`VirtualizationLoader::dematerialize`] themselves.
//!
//! With virtualization disabled every slot is materialized up front.

use tabswipe_core::ContentError;

use crate::position::{SlotContent, TabSlot};

/// Builds and tears down the real content of a slot.
pub trait ContentFactory {
    /// Opaque, cheaply cloneable handle to built content (e.g. an `Rc`).
    type Handle: Clone;

    fn create(&mut self, index: usize) -> Result<Self::Handle, ContentError>;

    /// Called exactly once for every handle the engine drops.
    fn dispose(&mut self, _index: usize, _handle: Self::Handle) {}
}

/// Adapts a closure into a [`ContentFactory`] with no-op disposal.
pub struct FnFactory<C>(pub C);

impl<H, C> ContentFactory for FnFactory<C>
where
    H: Clone,
    C: FnMut(usize) -> Result<H, ContentError>,
{
    type Handle = H;

    fn create(&mut self, index: usize) -> Result<H, ContentError> {
        (self.0)(index)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Materialized {
    /// The slot already had content; the factory was not called.
    Already,
    Created,
    /// The factory failed; the slot stays a placeholder.
    Failed(ContentError),
    NoSlots,
}

impl Materialized {
    pub fn has_content(&self) -> bool {
        matches!(self, Materialized::Already | Materialized::Created)
    }
}

pub struct VirtualizationLoader<F: ContentFactory> {
    factory: F,
    enabled: bool,
}

impl<F: ContentFactory> VirtualizationLoader<F> {
    pub fn new(factory: F, enabled: bool) -> Self {
        Self { factory, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Idempotent. Out-of-range indices are clamped to the last slot.
    pub fn ensure_materialized(
        &mut self,
        slots: &mut [TabSlot<F::Handle>],
        index: usize,
    ) -> Materialized {
        let Some(last) = slots.len().checked_sub(1) else {
            return Materialized::NoSlots;
        };
        let index = index.min(last);
        let slot = &mut slots[index];
        if slot.content.is_materialized() {
            return Materialized::Already;
        }

        match self.factory.create(index) {
            Ok(handle) => {
                log::debug!("virtualize: materialized slot {index}");
                slot.content = SlotContent::Materialized(handle);
                Materialized::Created
            }
            Err(e) => {
                log::warn!("virtualize: slot {index} stays a placeholder: {e}");
                Materialized::Failed(e)
            }
        }
    }

    /// Materializes every slot. Used when virtualization is off.
    pub fn materialize_all(&mut self, slots: &mut [TabSlot<F::Handle>]) -> usize {
        (0..slots.len())
            .filter(|&i| self.ensure_materialized(slots, i) == Materialized::Created)
            .count()
    }

    /// Materializes `indices` (already resolved, in range) and skips
    /// duplicates for free thanks to idempotence.
    pub fn ensure_all(&mut self, slots: &mut [TabSlot<F::Handle>], indices: &[usize]) {
        for &i in indices {
            self.ensure_materialized(slots, i);
        }
    }

    /// Returns a slot to placeholder state, disposing its content. Returns
    /// false if there was nothing to release.
    pub fn dematerialize(&mut self, slots: &mut [TabSlot<F::Handle>], index: usize) -> bool {
        let Some(slot) = slots.get_mut(index) else {
            return false;
        };
        match slot.content.take() {
            Some(handle) => {
                log::debug!("virtualize: released slot {index}");
                self.factory.dispose(index, handle);
                true
            }
            None => false,
        }
    }

    /// Disposes the content of a slot that left the collection.
    pub(crate) fn discard(&mut self, mut slot: TabSlot<F::Handle>) {
        if let Some(handle) = slot.content.take() {
            self.factory.dispose(slot.index, handle);
        }
    }

    pub fn materialized_count(slots: &[TabSlot<F::Handle>]) -> usize {
        slots.iter().filter(|s| s.is_materialized()).count()
    }
}
