//! Collaborator contracts.
//!
//! The window core never renders pages or draws widgets itself. Everything
//! it drives is reached through the traits below, which the embedder
//! implements for its real web view and toolkit widgets (and tests implement
//! with recording doubles).

use casement_types::{Result, TabId};

/// The embeddable view that renders and navigates one tab's content.
///
/// Readiness-dependent queries (`can_go_back`, `can_go_forward`) return
/// [`CasementError::SurfaceNotReady`](casement_types::CasementError) when
/// called before [`is_ready`](Self::is_ready) reports true. Callers are
/// expected to guard instead of relying on that error.
pub trait ContentSurface {
    fn navigate(&mut self, url: &str);
    fn reload(&mut self);
    fn stop(&mut self);

    fn can_go_back(&self) -> Result<bool>;
    fn can_go_forward(&self) -> Result<bool>;
    fn go_back(&mut self);
    fn go_forward(&mut self);

    /// Whether initial setup has completed.
    fn is_ready(&self) -> bool;
    /// Whether a fetch for the current navigation is in flight.
    fn is_loading_in_flight(&self) -> bool;

    /// Current page title, if the surface has one.
    fn title(&self) -> Option<String>;
    /// Current page URL, if the surface has one.
    fn url(&self) -> Option<String>;

    /// Show the surface and give it input focus.
    fn activate(&mut self);
    /// Hide or suspend the surface.
    fn deactivate(&mut self);

    /// Tear the surface down and release its resources.
    fn close(&mut self);
}

/// Creates the content surface for a freshly allocated tab.
pub trait SurfaceFactory {
    fn create_surface(&mut self, id: TabId) -> Box<dyn ContentSurface>;
}

/// Back/forward buttons and the stop/reload toggle.
pub trait NavigationChrome {
    fn set_back_enabled(&mut self, enabled: bool);
    fn set_forward_enabled(&mut self, enabled: bool);
    /// Show the stop control (hides reload).
    fn show_stop_control(&mut self);
    /// Show the reload control (hides stop).
    fn show_reload_control(&mut self);
}

/// Address bar and window title.
pub trait AddressBar {
    fn set_url(&mut self, url: &str);
    fn set_window_title(&mut self, title: &str);
    fn focus_input(&mut self);
    fn is_input_focused(&self) -> bool;
}

/// The host that owns the native window.
pub trait WindowHost {
    /// Tear down the whole window. Called once, after the last tab closes.
    fn close_window(&mut self);
}

/// Asynchronous notifications a content surface reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Initial setup completed; navigation-state queries are now safe.
    Ready,
    /// A fetch started.
    LoadStarted,
    /// The in-flight fetch finished (successfully or not).
    LoadFinished,
    TitleChanged,
    UrlChanged,
}
