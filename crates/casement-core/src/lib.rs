//! Tab and window state coordinator for a single Casement browser window.
//!
//! The [`BrowserWindowController`] owns the open tabs of one window, tracks
//! which tab is active, and keeps the window chrome (history buttons, the
//! stop/reload toggle, title and address bar) in step with the active tab's
//! loading state. Page rendering and the chrome widgets themselves live
//! behind the collaborator traits in [`surface`].

pub mod active;
pub mod chrome;
pub mod controller;
pub mod headless;
pub mod history;
pub mod registry;
pub mod surface;
pub mod tab;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use active::{ActiveTabTracker, Activation};
pub use casement_types::{CasementError, Result, TabId, WindowCommand, WindowConfig};
pub use chrome::{ChromeState, NavControl, WindowChromeSync};
pub use controller::{BrowserWindowController, WindowLifecycle};
pub use headless::{HeadlessHandle, HeadlessSurface, HeadlessSurfaceFactory};
pub use history::{HistoryEntry, SessionHistory};
pub use registry::TabRegistry;
pub use surface::{
    AddressBar, ContentSurface, NavigationChrome, SurfaceEvent, SurfaceFactory, WindowHost,
};
pub use tab::{NavigationState, TabRecord};
