use std::fmt;
use std::rc::Rc;

/// Event delivered to listeners by [`crate::Node::dispatch_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A shared event callback. Two listeners are equal when they wrap the same
/// closure allocation, which is what removal matches on.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&Event)>);

impl Listener {
    pub fn new<F: Fn(&Event) + 'static>(f: F) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    pub fn ptr_eq(&self, other: &Listener) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Per-node listener table, keyed by event name.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    entries: Vec<(String, Listener)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Registers `listener` for `event`. Returns false when that exact
    /// listener is already registered for the event.
    pub fn on(&mut self, event: impl Into<String>, listener: Listener) -> bool {
        let event = event.into();
        if self.entries.iter().any(|(e, l)| *e == event && l.ptr_eq(&listener)) {
            return false;
        }
        self.entries.push((event, listener));
        true
    }

    pub fn remove(&mut self, event: &str, listener: &Listener) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|(e, l)| !(e == event && l.ptr_eq(listener)));
        self.entries.len() != before
    }

    pub fn has(&self, event: &str) -> bool {
        self.entries.iter().any(|(e, _)| e == event)
    }

    pub fn count(&self, event: &str) -> usize {
        self.entries.iter().filter(|(e, _)| e == event).count()
    }

    /// Snapshot of the listeners for `event`, in registration order.
    pub fn matching(&self, event: &str) -> Vec<Listener> {
        self.entries
            .iter()
            .filter(|(e, _)| e == event)
            .map(|(_, l)| l.clone())
            .collect()
    }
}
