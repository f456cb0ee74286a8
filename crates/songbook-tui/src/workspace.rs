//! WorkspaceManager — which panes are on screen and which one has focus.
//!
//! Pane visibility comes from the navigator's derived `Panels`; this keeps
//! the focus ring in step with it.

use songbook_core::Panels;

use crate::action::ComponentId;
use crate::focus::FocusRing;

pub struct WorkspaceManager {
    pub show_keys_bar: bool,
    pub focus: FocusRing,
    panels: Panels,
}

impl WorkspaceManager {
    pub fn new(panels: Panels) -> Self {
        let mut wm = Self {
            show_keys_bar: true,
            focus: FocusRing::default(),
            panels,
        };
        wm.rebuild_focus_ring();
        wm
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    /// Adopt a new panel set. Returns `true` if visibility changed.
    pub fn sync_panels(&mut self, panels: Panels) -> bool {
        if self.panels == panels {
            return false;
        }
        self.panels = panels;
        self.rebuild_focus_ring();
        true
    }

    fn rebuild_focus_ring(&mut self) {
        let mut items = Vec::with_capacity(2);
        if self.panels.list {
            items.push(ComponentId::SongList);
        }
        if self.panels.detail {
            items.push(ComponentId::Lyrics);
        }
        self.focus.set_items(items);
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.focus.current()
    }

    pub fn focus_next(&mut self) -> Option<ComponentId> {
        self.focus.next()
    }

    pub fn focus_prev(&mut self) -> Option<ComponentId> {
        self.focus.prev()
    }

    pub fn focus_set(&mut self, id: ComponentId) -> bool {
        self.focus.set(id)
    }
}
