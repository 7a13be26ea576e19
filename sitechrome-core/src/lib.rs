//! Sitechrome Core
//!
//! Platform-agnostic state for the navigation and theme enhancements of a
//! static site. Every controller takes an event and returns the effects to
//! render, so this crate never touches a DOM.

pub mod active_link;
pub mod config;
pub mod drawer;
pub mod menu;
pub mod prefs;
pub mod scroll;
pub mod theme;

// Re-export commonly used types
pub use active_link::{current_links, is_current, page_directory};
pub use config::{ChromeConfig, ConfigError, DrawerConfig, MenuConfig, StorageKeys, ThemeConfig};
pub use drawer::{Drawer, DrawerEffect, DrawerEvent};
pub use menu::{GroupId, MenuEffect, MenuEvent, MenuGroups};
pub use prefs::{MemoryStore, PreferenceStore, Preferences};
pub use scroll::{PINNED_PROPERTIES, ScrollLock, ScrollPin, ScrollProbe};
pub use theme::{
    BaseTheme, ContrastIndicator, EffectiveTheme, ThemeEffect, ThemeInputs, ThemeReconciler,
    ThemeView, UnknownTheme, derive_view,
};
