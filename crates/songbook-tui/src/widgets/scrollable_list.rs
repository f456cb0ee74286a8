//! Scrollable list cursor — selection and scroll offset over a list of items.
//!
//! Filtering happens upstream; this only tracks where the cursor and the
//! viewport are.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl<T: PartialEq> ScrollableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Replace the items, keeping the cursor on the same item when it survives.
    pub fn set_items(&mut self, items: Vec<T>) {
        let previous = self.items.get(self.selected);
        let kept = previous.and_then(|p| items.iter().position(|i| i == p));
        self.items = items;
        match kept {
            Some(pos) => self.selected = pos,
            None => {
                self.selected = 0;
                self.scroll_offset = 0;
            }
        }
        self.clamp();
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.items.len() - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    /// Move the cursor to `item` if present. Returns whether it was found.
    pub fn select_item(&mut self, item: &T) -> bool {
        match self.items.iter().position(|i| i == item) {
            Some(pos) => {
                self.selected = pos;
                true
            }
            None => false,
        }
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Put the viewport back at `offset` and keep the cursor inside it.
    pub fn restore_scroll(&mut self, offset: usize, height: usize) {
        self.scroll_offset = offset.min(self.items.len().saturating_sub(1));
        if height > 0
            && (self.selected < self.scroll_offset || self.selected >= self.scroll_offset + height)
        {
            self.selected = self.scroll_offset;
        }
    }

    /// `(position, &item)` pairs visible in `height` rows.
    /// Call `ensure_visible` first to update `scroll_offset`.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.items.is_empty() {
            return Vec::new();
        }
        let start = self.scroll_offset.min(self.items.len());
        let end = (start + height).min(self.items.len());
        (start..end).map(|pos| (pos, &self.items[pos])).collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if the row holds an item.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.items.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clamp(&mut self) {
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }
}

impl<T: PartialEq> Default for ScrollableList<T> {
    fn default() -> Self {
        Self::new()
    }
}
