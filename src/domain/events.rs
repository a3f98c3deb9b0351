//! Change notification for tree observers

use std::fmt;

/// Signals emitted by a [`CheckTree`](crate::domain::CheckTree).
///
/// Events carry no payload; observers re-query the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeEvent {
    /// A `check` call found its target and updated the selection.
    SelectionChanged,
}

impl TreeEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            TreeEvent::SelectionChanged => "selection-changed",
        }
    }
}

impl fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives tree events. Implemented for any `FnMut(&TreeEvent)`.
pub trait TreeObserver {
    fn notify(&mut self, event: &TreeEvent);
}

impl<F> TreeObserver for F
where
    F: FnMut(&TreeEvent),
{
    fn notify(&mut self, event: &TreeEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn TreeObserver>)>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Observers {
    pub fn subscribe(&mut self, observer: Box<dyn TreeObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: TreeEvent) {
        for (_, observer) in self.entries.iter_mut() {
            observer.notify(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn given_two_observers_when_emitting_then_both_receive_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();

        let first = Rc::clone(&log);
        observers.subscribe(Box::new(move |e: &TreeEvent| first.borrow_mut().push(("a", *e))));
        let second = Rc::clone(&log);
        observers.subscribe(Box::new(move |e: &TreeEvent| second.borrow_mut().push(("b", *e))));

        observers.emit(TreeEvent::SelectionChanged);

        assert_eq!(
            *log.borrow(),
            vec![("a", TreeEvent::SelectionChanged), ("b", TreeEvent::SelectionChanged)]
        );
    }

    #[test]
    fn given_unsubscribed_observer_when_emitting_then_not_notified() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::default();
        let c = Rc::clone(&count);
        let id = observers.subscribe(Box::new(move |_: &TreeEvent| *c.borrow_mut() += 1));

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.emit(TreeEvent::SelectionChanged);

        assert_eq!(*count.borrow(), 0);
        assert!(observers.is_empty());
    }

    #[test]
    fn selection_changed_has_stable_name() {
        assert_eq!(TreeEvent::SelectionChanged.to_string(), "selection-changed");
    }
}
