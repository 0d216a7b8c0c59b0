//! Typed listener lists.
//!
//! Each notification type gets exactly one [`Listeners`] list, owned by the
//! component that raises it. Listeners receive the event mutably so that
//! cancelable notifications can be answered in place.

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct ListenerId;
}

pub struct Listeners<E> {
    subs: SlotMap<ListenerId, Box<dyn FnMut(&mut E)>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            subs: SlotMap::with_key(),
        }
    }

    pub fn subscribe(&mut self, f: impl FnMut(&mut E) + 'static) -> ListenerId {
        self.subs.insert(Box::new(f))
    }

    /// Returns false if `id` was not registered here (or already removed).
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let removed = self.subs.remove(id).is_some();
        if !removed {
            log::trace!("listeners: {id:?} was not subscribed");
        }
        removed
    }

    /// Calls every listener in registration order.
    pub fn dispatch(&mut self, event: &mut E) {
        for (_, sub) in self.subs.iter_mut() {
            sub(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.subs.len())
            .finish()
    }
}
