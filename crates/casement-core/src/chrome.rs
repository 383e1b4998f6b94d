//! Window chrome synchronization.
//!
//! Derives the history buttons, the stop/reload toggle, the window title and
//! the address bar text from the active tab and pushes them to the external
//! widgets. The derivation never assumes the surface is ready: history
//! capability is only queried once the tab reports `Ready`.

use casement_types::{TabId, WindowConfig};

use crate::registry::TabRegistry;
use crate::surface::{AddressBar, ContentSurface, NavigationChrome};
use crate::tab::TabRecord;

/// Which half of the stop/reload toggle is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavControl {
    Stop,
    Reload,
}

/// Everything the chrome shows, as last computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeState {
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub control: NavControl,
    pub window_title: String,
    pub url: String,
}

/// Pushes chrome state derived from the active tab to the chrome widgets.
pub struct WindowChromeSync {
    nav: Box<dyn NavigationChrome>,
    address: Box<dyn AddressBar>,
    config: WindowConfig,
    last: Option<ChromeState>,
}

impl WindowChromeSync {
    pub fn new(
        config: WindowConfig,
        nav: Box<dyn NavigationChrome>,
        address: Box<dyn AddressBar>,
    ) -> Self {
        Self {
            nav,
            address,
            config,
            last: None,
        }
    }

    /// Recompute chrome for `active` and push it.
    ///
    /// Idempotent. With `skip_redundant_chrome` set, a push that would
    /// repeat the previous one is dropped.
    pub fn resync(&mut self, active: Option<TabId>, registry: &mut TabRegistry) {
        let state = match active {
            Some(id) => match registry.refresh(id).cloned() {
                Ok(record) => match registry.surface(id) {
                    Ok(surface) => self.compute(&record, surface),
                    Err(_) => self.blank_state(),
                },
                Err(e) => {
                    log::warn!("Chrome resync for missing tab: {e}");
                    self.blank_state()
                },
            },
            None => self.blank_state(),
        };
        self.push(state);
    }

    /// Request address bar focus unless it already has it.
    pub fn focus_address_bar(&mut self) {
        if !self.address.is_input_focused() {
            self.address.focus_input();
        }
    }

    /// Forget the last pushed state so the next resync pushes everything.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn last_state(&self) -> Option<&ChromeState> {
        self.last.as_ref()
    }

    fn compute(&self, record: &TabRecord, surface: &dyn ContentSurface) -> ChromeState {
        let (back_enabled, forward_enabled) = if record.is_ready() {
            (
                query(record.id, "back", surface.can_go_back()),
                query(record.id, "forward", surface.can_go_forward()),
            )
        } else {
            (false, false)
        };

        let control = if record.loading {
            NavControl::Stop
        } else {
            NavControl::Reload
        };

        let page_title = surface
            .title()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.config.default_title.clone());

        let ready_url = if record.is_ready() {
            surface.url().filter(|u| !u.is_empty())
        } else {
            None
        };
        let url = ready_url
            .or_else(|| record.requested_url.clone())
            .unwrap_or_else(|| self.config.url_placeholder.clone());

        ChromeState {
            back_enabled,
            forward_enabled,
            control,
            window_title: self.config.window_title(&page_title),
            url,
        }
    }

    fn blank_state(&self) -> ChromeState {
        ChromeState {
            back_enabled: false,
            forward_enabled: false,
            control: NavControl::Reload,
            window_title: self.config.window_title(&self.config.default_title),
            url: self.config.url_placeholder.clone(),
        }
    }

    fn push(&mut self, state: ChromeState) {
        if self.config.skip_redundant_chrome && self.last.as_ref() == Some(&state) {
            log::trace!("Chrome unchanged, skipping push");
            return;
        }
        self.nav.set_back_enabled(state.back_enabled);
        self.nav.set_forward_enabled(state.forward_enabled);
        match state.control {
            NavControl::Stop => self.nav.show_stop_control(),
            NavControl::Reload => self.nav.show_reload_control(),
        }
        self.address.set_url(&state.url);
        self.address.set_window_title(&state.window_title);
        self.last = Some(state);
    }
}

/// History capability of a ready surface. A failing query counts as
/// unavailable.
fn query(id: TabId, which: &str, result: casement_types::Result<bool>) -> bool {
    result.unwrap_or_else(|e| {
        log::error!("Tab {id} {which} query failed: {e}");
        false
    })
}
