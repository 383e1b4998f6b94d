//! Browser window controller.
//!
//! The façade every input path (shortcuts, IPC, UI clicks, surface
//! notifications) calls into. It composes the [`TabRegistry`], the
//! [`ActiveTabTracker`] and the [`WindowChromeSync`], and owns the window
//! lifecycle: `Initializing -> Running -> Closing`.


use casement_types::{CasementError, Result, TabId, WindowConfig};

use crate::active::{ActiveTabTracker, Activation};
use crate::chrome::WindowChromeSync;
use crate::registry::TabRegistry;
use crate::surface::{AddressBar, NavigationChrome, SurfaceEvent, SurfaceFactory, WindowHost};
use crate::tab::TabRecord;

/// Lifecycle of the window this controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLifecycle {
    /// Seeding the first tab.
    Initializing,
    Running,
    /// The last tab closed and teardown was requested. Terminal.
    Closing,
}

/// Controlling logic of one browser window.
pub struct BrowserWindowController {
    config: WindowConfig,
    registry: TabRegistry,
    tracker: ActiveTabTracker,
    chrome: WindowChromeSync,
    factory: Box<dyn SurfaceFactory>,
    host: Box<dyn WindowHost>,
    lifecycle: WindowLifecycle,
}

impl BrowserWindowController {
    /// Build the controller for a new window.
    ///
    /// The window always starts with one active tab loading
    /// `config.home_url`.
    pub fn new(
        config: WindowConfig,
        factory: Box<dyn SurfaceFactory>,
        nav_chrome: Box<dyn NavigationChrome>,
        address_bar: Box<dyn AddressBar>,
        host: Box<dyn WindowHost>,
    ) -> Self {
        let chrome = WindowChromeSync::new(config.clone(), nav_chrome, address_bar);
        let mut controller = Self {
            config,
            registry: TabRegistry::new(),
            tracker: ActiveTabTracker::new(),
            chrome,
            factory,
            host,
            lifecycle: WindowLifecycle::Initializing,
        };

        let home = controller.config.home_url.clone();
        let id = controller.spawn_tab(&home);
        if let Err(e) = controller.activate_new_tab(id) {
            log::error!("Failed to activate seed tab {id}: {e}");
        }
        controller.lifecycle = WindowLifecycle::Running;
        log::info!("Window running with seed tab {id} ({home})");
        controller
    }

    // -- Tabs --

    /// Open a tab loading `url`, optionally bringing it to the foreground.
    pub fn add_new_tab(&mut self, url: &str, activate: bool) -> Result<TabId> {
        if self.lifecycle == WindowLifecycle::Closing {
            return Err(CasementError::WindowClosed);
        }
        let id = self.spawn_tab(url);
        if activate {
            self.activate_new_tab(id)?;
        }
        log::info!(
            "Opened tab {id} ({url}){}",
            if activate { "" } else { " in background" }
        );
        Ok(id)
    }

    /// Switch to `id`. Switching to the active tab is a no-op.
    pub fn activate_tab_by_id(&mut self, id: TabId) -> Result<()> {
        if self.tracker.is_active(id) {
            return Ok(());
        }
        self.tracker
            .activate(id, &mut self.registry, &mut self.chrome)?;
        Ok(())
    }

    /// Close `id`.
    ///
    /// Closing the active tab leaves the window without an active tab;
    /// picking the next one is up to the caller. Closing the last tab moves
    /// the window to `Closing` and asks the host to tear it down.
    pub fn handle_tab_close(&mut self, id: TabId) -> Result<()> {
        self.registry.close(id)?;
        let was_active = self.tracker.release(id);
        log::info!(
            "Closed tab {id}{} ({} open)",
            if was_active { " (active)" } else { "" },
            self.registry.open_count()
        );

        if self.registry.is_empty() {
            if self.lifecycle != WindowLifecycle::Closing {
                self.lifecycle = WindowLifecycle::Closing;
                log::info!("Last tab closed, tearing down window");
                self.host.close_window();
            }
            return Ok(());
        }

        if was_active {
            self.chrome.resync(None, &mut self.registry);
        }
        Ok(())
    }

    // -- Navigation --

    /// Load `url` in the active tab.
    pub fn navigate_to(&mut self, url: &str) -> Result<()> {
        let id = self.active_id()?;
        self.registry.mark_navigation_requested(id, url)?;
        self.registry.surface_mut(id)?.navigate(url);
        log::debug!("Tab {id} navigating to {url}");
        self.chrome.resync(Some(id), &mut self.registry);
        Ok(())
    }

    /// History back in the active tab.
    ///
    /// Returns false when there is no active tab, its surface is not ready,
    /// or there is nothing to go back to.
    pub fn go_back(&mut self) -> bool {
        self.step_history(HistoryStep::Back)
    }

    /// History forward in the active tab. Same failure outcomes as
    /// [`go_back`](Self::go_back).
    pub fn go_forward(&mut self) -> bool {
        self.step_history(HistoryStep::Forward)
    }

    /// Reload the active tab. The surface decides what a reload means in
    /// its current state; chrome is resynced from whatever it reports.
    pub fn reload(&mut self) -> Result<()> {
        let id = self.active_id()?;
        self.registry.surface_mut(id)?.reload();
        self.chrome.resync(Some(id), &mut self.registry);
        Ok(())
    }

    pub fn stop_loading(&mut self) -> Result<()> {
        let id = self.active_id()?;
        self.registry.surface_mut(id)?.stop();
        self.chrome.resync(Some(id), &mut self.registry);
        Ok(())
    }

    // -- Surface notifications --

    /// Fold an asynchronous surface notification into the tab's state.
    ///
    /// Chrome is only resynced when the notification concerns the active
    /// tab. Late notifications for closed tabs return `NotFound`.
    pub fn handle_surface_event(&mut self, id: TabId, event: SurfaceEvent) -> Result<()> {
        self.registry.apply_event(id, event)?;
        log::debug!("Tab {id} surface event {event:?}");
        if self.tracker.is_active(id) {
            self.chrome.resync(Some(id), &mut self.registry);
        }
        Ok(())
    }

    // -- Accessors --

    pub fn active_tab(&self) -> Option<TabId> {
        self.tracker.active()
    }

    pub fn tab(&self, id: TabId) -> Result<&TabRecord> {
        self.registry.get(id)
    }

    /// Open tabs in creation order.
    pub fn tab_ids(&self) -> Vec<TabId> {
        self.registry.ids()
    }

    pub fn open_count(&self) -> usize {
        self.registry.open_count()
    }

    pub fn created_count(&self) -> u64 {
        self.registry.created_count()
    }

    pub fn lifecycle(&self) -> WindowLifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn chrome(&self) -> &WindowChromeSync {
        &self.chrome
    }

    /// Title the tab's surface reports, if any.
    pub fn tab_title(&self, id: TabId) -> Result<Option<String>> {
        Ok(self.registry.surface(id)?.title())
    }

    // -- Internals --

    fn active_id(&self) -> Result<TabId> {
        self.tracker.active().ok_or(CasementError::NoActiveTab)
    }

    /// Create a tab and hand its surface the initial URL.
    fn spawn_tab(&mut self, url: &str) -> TabId {
        let surface = self.factory.create_surface(self.registry.peek_next_id());
        let id = self.registry.create(surface);
        if let Err(e) = self.navigate_tab(id, url) {
            log::error!("Initial navigation of tab {id} failed: {e}");
        }
        id
    }

    fn navigate_tab(&mut self, id: TabId, url: &str) -> Result<()> {
        self.registry.mark_navigation_requested(id, url)?;
        self.registry.surface_mut(id)?.navigate(url);
        Ok(())
    }

    fn activate_new_tab(&mut self, id: TabId) -> Result<()> {
        let activation = self
            .tracker
            .activate(id, &mut self.registry, &mut self.chrome)?;
        if activation != Activation::Unchanged && self.config.focus_address_bar_on_new_tab {
            self.chrome.focus_address_bar();
        }
        Ok(())
    }

    fn step_history(&mut self, step: HistoryStep) -> bool {
        let Some(id) = self.tracker.active() else {
            log::debug!("{step:?} ignored: no active tab");
            return false;
        };
        let Ok(record) = self.registry.refresh(id) else {
            return false;
        };
        if !record.is_ready() {
            log::debug!("{step:?} ignored: tab {id} not ready");
            return false;
        }
        let Ok(surface) = self.registry.surface_mut(id) else {
            return false;
        };

        let available = match step {
            HistoryStep::Back => surface.can_go_back(),
            HistoryStep::Forward => surface.can_go_forward(),
        };
        match available {
            Ok(true) => {},
            Ok(false) => return false,
            Err(e) => {
                log::error!("Tab {id} history query failed: {e}");
                return false;
            },
        }
        match step {
            HistoryStep::Back => surface.go_back(),
            HistoryStep::Forward => surface.go_forward(),
        }
        self.chrome.resync(Some(id), &mut self.registry);
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum HistoryStep {
    Back,
    Forward,
}
