use smallvec::SmallVec;
use tabswipe_core::{ListenerId, Listeners};

/// Cancelable notification raised before the selection may move from
/// `old_index` to `proposed_index`. Any listener may set `cancel`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChanging {
    pub old_index: usize,
    pub proposed_index: usize,
    pub cancel: bool,
}

/// Asks the host for permission before an index change begins.
///
/// One negotiation per directional commitment: proposing the index that was
/// just negotiated answers from the last verdict, while a different index
/// (a reversal towards the other neighbour, or back again) asks the host
/// anew. Vetoes are remembered per index until [`SelectionNegotiator::reset`]
/// so the release rules can treat a refused neighbour as absent; a later
/// approval of the same index lifts its veto.
#[derive(Debug, Default)]
pub struct SelectionNegotiator {
    listeners: Listeners<SelectionChanging>,
    last: Option<(usize, bool)>,
    vetoed: SmallVec<[usize; 2]>,
}

impl SelectionNegotiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&mut SelectionChanging) + 'static) -> ListenerId {
        self.listeners.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// True if the selection may move to `proposed`. Staying put is always
    /// allowed and never notifies.
    pub fn propose(&mut self, old: usize, proposed: usize) -> bool {
        if old == proposed {
            return true;
        }
        if let Some((index, allowed)) = self.last
            && index == proposed
        {
            return allowed;
        }

        let mut args = SelectionChanging {
            old_index: old,
            proposed_index: proposed,
            cancel: false,
        };
        self.listeners.dispatch(&mut args);
        let allowed = !args.cancel;

        self.vetoed.retain(|i| *i != proposed);
        if !allowed {
            log::debug!("negotiate: host vetoed {old} -> {proposed}");
            self.vetoed.push(proposed);
        }
        self.last = Some((proposed, allowed));
        allowed
    }

    /// Release-time check: an index refused during this gesture stays
    /// refused, anything else goes through [`SelectionNegotiator::propose`].
    pub fn confirm(&mut self, old: usize, proposed: usize) -> bool {
        !self.is_vetoed(proposed) && self.propose(old, proposed)
    }

    pub fn is_vetoed(&self, index: usize) -> bool {
        self.vetoed.contains(&index)
    }

    /// Forgets the finished gesture's negotiations.
    pub fn reset(&mut self) {
        self.last = None;
        self.vetoed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn returning_to_origin_never_notifies() {
        let seen = Rc::new(RefCell::new(0));
        let mut n = SelectionNegotiator::new();
        let s = seen.clone();
        n.subscribe(move |_| *s.borrow_mut() += 1);

        assert!(n.propose(1, 1));
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn same_proposal_is_asked_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut n = SelectionNegotiator::new();
        let s = seen.clone();
        n.subscribe(move |ev| s.borrow_mut().push(ev.proposed_index));

        assert!(n.propose(1, 2));
        assert!(n.propose(1, 2));
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn reversal_asks_again() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut n = SelectionNegotiator::new();
        let s = seen.clone();
        n.subscribe(move |ev| s.borrow_mut().push(ev.proposed_index));

        assert!(n.propose(1, 2));
        assert!(n.propose(1, 0));
        assert!(n.propose(1, 2));
        assert_eq!(*seen.borrow(), vec![2, 0, 2]);

        n.reset();
        assert!(n.propose(1, 2));
        assert_eq!(*seen.borrow(), vec![2, 0, 2, 2]);
    }

    #[test]
    fn later_approval_lifts_veto() {
        let refuse = Rc::new(RefCell::new(true));
        let mut n = SelectionNegotiator::new();
        let r = refuse.clone();
        n.subscribe(move |ev| ev.cancel = ev.proposed_index == 2 && *r.borrow());

        assert!(!n.propose(1, 2));
        assert!(n.propose(1, 0));
        assert!(n.is_vetoed(2));

        *refuse.borrow_mut() = false;
        assert!(n.propose(1, 2));
        assert!(!n.is_vetoed(2));
    }

    #[test]
    fn confirm_keeps_an_earlier_veto() {
        let seen = Rc::new(RefCell::new(0));
        let mut n = SelectionNegotiator::new();
        let s = seen.clone();
        n.subscribe(move |ev| {
            *s.borrow_mut() += 1;
            ev.cancel = ev.proposed_index == 2;
        });

        assert!(!n.propose(1, 2));
        assert!(n.propose(1, 0));
        assert!(!n.confirm(1, 2));
        assert!(n.confirm(1, 0));
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn veto_sticks_until_reset() {
        let mut n = SelectionNegotiator::new();
        n.subscribe(|ev| ev.cancel = ev.proposed_index == 2);

        assert!(!n.propose(1, 2));
        assert!(n.is_vetoed(2));
        assert!(!n.is_vetoed(0));
        assert!(!n.propose(1, 2));

        n.reset();
        assert!(!n.is_vetoed(2));
    }

    #[test]
    fn any_listener_can_cancel() {
        let mut n = SelectionNegotiator::new();
        n.subscribe(|ev| ev.cancel = true);
        n.subscribe(|_| {});
        assert!(!n.propose(0, 1));
    }
}
