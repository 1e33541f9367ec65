//! Change notifications.
//!
//! The core never talks to a UI directly. Interested parties register a
//! handler through [`crate::api::VaultApi::on_change`] and are told about every
//! completed mutation. A failing handler is logged and skipped: the data
//! operation it reports on has already been persisted.

use crate::error::Result;
use crate::model::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEvent {
    Added(Record),
    Edited(Record),
    Deleted(Vec<String>),
    Imported { count: usize },
}

impl VaultEvent {
    pub fn name(&self) -> &'static str {
        match self {
            VaultEvent::Added(_) => "added",
            VaultEvent::Edited(_) => "edited",
            VaultEvent::Deleted(_) => "deleted",
            VaultEvent::Imported { .. } => "imported",
        }
    }
}

pub type ChangeHandler = Box<dyn FnMut(&VaultEvent) -> Result<()>>;

#[derive(Default)]
pub struct EventBus {
    handlers: Vec<ChangeHandler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&VaultEvent) -> Result<()> + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Delivers `event` to every handler in registration order.
    pub fn emit(&mut self, event: &VaultEvent) {
        for (position, handler) in self.handlers.iter_mut().enumerate() {
            if let Err(err) = handler(event) {
                log::warn!(
                    "change handler #{} failed on {} event: {}",
                    position,
                    event.name(),
                    err
                );
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = Rc::clone(&seen);
        bus.subscribe(move |e| {
            first.borrow_mut().push(format!("a:{}", e.name()));
            Ok(())
        });
        let second = Rc::clone(&seen);
        bus.subscribe(move |e| {
            second.borrow_mut().push(format!("b:{}", e.name()));
            Ok(())
        });

        bus.emit(&VaultEvent::Imported { count: 3 });
        assert_eq!(*seen.borrow(), vec!["a:imported", "b:imported"]);
    }

    #[test]
    fn failing_handler_does_not_stop_others() {
        let hits = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        bus.subscribe(|_| Err(VaultError::Api("render failed".into())));
        let counter = Rc::clone(&hits);
        bus.subscribe(move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        bus.emit(&VaultEvent::Deleted(vec!["book_0001".into()]));
        bus.emit(&VaultEvent::Deleted(vec!["book_0002".into()]));
        assert_eq!(*hits.borrow(), 2);
        assert_eq!(bus.len(), 2);
    }
}
