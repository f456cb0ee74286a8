//! Song catalog, search, and navigation state for the songbook lyrics browser.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod location;
pub mod nav;
pub mod platform;
pub mod prefs;
pub mod song;
pub mod viewport;

pub use catalog::{Catalog, CatalogSource};
pub use error::CatalogError;
pub use history::{History, MemoryHistory};
pub use location::QueryParams;
pub use nav::{Effect, NavAction, NavigationState, Navigator};
pub use song::Song;
pub use viewport::{LayoutMode, Panels, View};
