//! FocusRing — manages keyboard focus cycling between components.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    /// Focus `id` if it is in the ring. Returns whether focus moved there.
    pub fn set(&mut self, id: ComponentId) -> bool {
        match self.items.iter().position(|&x| x == id) {
            Some(pos) => {
                self.current = pos;
                true
            }
            None => false,
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Replace the ring contents, keeping the focused id when it survives.
    pub fn set_items(&mut self, items: Vec<ComponentId>) {
        let old = self.current();
        self.items = items;
        if let Some(id) = old {
            if let Some(pos) = self.items.iter().position(|&x| x == id) {
                self.current = pos;
                return;
            }
        }
        self.current = 0;
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let mut ring = FocusRing::new(vec![ComponentId::SongList, ComponentId::Lyrics]);
        assert_eq!(ring.next(), Some(ComponentId::Lyrics));
        assert_eq!(ring.next(), Some(ComponentId::SongList));
        assert_eq!(ring.prev(), Some(ComponentId::Lyrics));
    }

    #[test]
    fn test_set_items_keeps_survivor() {
        let mut ring = FocusRing::new(vec![ComponentId::SongList, ComponentId::Lyrics]);
        ring.set(ComponentId::Lyrics);
        ring.set_items(vec![ComponentId::Lyrics]);
        assert!(ring.is_focused(ComponentId::Lyrics));

        ring.set_items(vec![ComponentId::SongList]);
        assert!(ring.is_focused(ComponentId::SongList));
    }

    #[test]
    fn test_empty_ring() {
        let mut ring = FocusRing::default();
        assert_eq!(ring.next(), None);
        assert!(!ring.set(ComponentId::Lyrics));
    }
}
