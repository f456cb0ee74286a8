//! History — a durable, navigable serializer for navigation state.
//!
//! Mirrors a browser history: writes push a new entry, back/forward move a
//! cursor and fire a change notification ("popstate") that the host answers
//! by re-hydrating its state from [`History::read`]. Writes never notify.

use tracing::trace;

use crate::location::QueryParams;

/// Change listener. Invoked with the location that became current.
pub type ChangeListener = Box<dyn FnMut(&QueryParams) + Send>;

pub trait History {
    /// The current location.
    fn read(&self) -> QueryParams;

    /// Make `params` the current location.
    fn write(&mut self, params: QueryParams);

    /// Register a listener fired when the location changes from outside
    /// (back/forward), never for [`History::write`].
    fn on_change(&mut self, listener: ChangeListener);
}

/// In-memory history stack with a cursor.
pub struct MemoryHistory {
    entries: Vec<QueryParams>,
    cursor: usize,
    listeners: Vec<ChangeListener>,
}

impl MemoryHistory {
    pub fn new(initial: QueryParams) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            listeners: Vec::new(),
        }
    }

    /// Start from a query string such as `?song=Alpha`.
    pub fn from_location(location: &str) -> Self {
        Self::new(QueryParams::parse(location))
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Step back one entry. Returns `false` (and notifies nobody) at the start.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        self.notify();
        true
    }

    /// Step forward one entry. Returns `false` at the newest entry.
    pub fn go_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        self.notify();
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn current(&self) -> &QueryParams {
        &self.entries[self.cursor]
    }

    fn notify(&mut self) {
        let current = self.current().clone();
        trace!("history -> {}", current);
        for listener in &mut self.listeners {
            listener(&current);
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(QueryParams::new())
    }
}

impl History for MemoryHistory {
    fn read(&self) -> QueryParams {
        self.current().clone()
    }

    fn write(&mut self, params: QueryParams) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(params);
        self.cursor = self.entries.len() - 1;
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_write_pushes_and_truncates_forward() {
        let mut history = MemoryHistory::from_location("?a=1");
        history.write(QueryParams::parse("?a=2"));
        history.write(QueryParams::parse("?a=3"));
        assert_eq!(history.len(), 3);

        assert!(history.go_back());
        assert!(history.go_back());
        assert_eq!(history.read().get("a"), Some("1"));

        history.write(QueryParams::parse("?a=4"));
        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(history.read().get("a"), Some("4"));
    }

    #[test]
    fn test_back_forward_notify() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut history = MemoryHistory::default();
        history.on_change(Box::new(move |p: &QueryParams| {
            sink.lock().unwrap().push(p.to_query_string());
        }));

        history.write(QueryParams::parse("?song=x"));
        assert!(seen.lock().unwrap().is_empty(), "writes must not notify");

        assert!(history.go_back());
        assert!(!history.go_back());
        assert!(history.go_forward());
        assert!(!history.go_forward());
        assert_eq!(*seen.lock().unwrap(), vec!["".to_string(), "?song=x".to_string()]);
    }
}
