//! Viewport policy — which panels are visible for a given width and view.
//!
//! Below the breakpoint list and detail are mutually exclusive and the back
//! control only accompanies the detail panel. At or above it both panels are
//! always shown and there is no back control.

/// Default breakpoint, in terminal columns.
pub const DEFAULT_BREAKPOINT: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Narrow,
    Wide,
}

impl LayoutMode {
    pub fn from_width(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    pub fn is_narrow(self) -> bool {
        self == Self::Narrow
    }
}

/// The two presentation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    List,
    Detail,
}

/// Derived panel visibility. Never stored; always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub list: bool,
    pub detail: bool,
    pub back: bool,
}

impl Panels {
    pub fn derive(layout: LayoutMode, view: View) -> Self {
        match (layout, view) {
            (LayoutMode::Wide, _) => Self {
                list: true,
                detail: true,
                back: false,
            },
            (LayoutMode::Narrow, View::List) => Self {
                list: true,
                detail: false,
                back: false,
            },
            (LayoutMode::Narrow, View::Detail) => Self {
                list: false,
                detail: true,
                back: true,
            },
        }
    }
}
