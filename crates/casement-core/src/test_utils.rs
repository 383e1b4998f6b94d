//! Shared test utilities for the window core.
//!
//! Provides recording doubles for every collaborator trait. All doubles
//! append to one shared [`CallLog`] so tests can assert on the relative
//! order of surface effects and chrome pushes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use casement_types::{CasementError, Result, TabId, WindowConfig};

use crate::controller::BrowserWindowController;
use crate::surface::{AddressBar, ContentSurface, NavigationChrome, SurfaceFactory, WindowHost};

/// A recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Navigate(TabId, String),
    Reload(TabId),
    Stop(TabId),
    QueryBack(TabId),
    QueryForward(TabId),
    GoBack(TabId),
    GoForward(TabId),
    Activate(TabId),
    Deactivate(TabId),
    CloseSurface(TabId),
    BackEnabled(bool),
    ForwardEnabled(bool),
    ShowStop,
    ShowReload,
    SetUrl(String),
    SetTitle(String),
    FocusInput,
    CloseWindow,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Scriptable state behind one mock surface.
#[derive(Debug, Default)]
pub struct MockSurfaceState {
    pub ready: bool,
    pub loading: bool,
    pub can_back: bool,
    pub can_forward: bool,
    pub title: Option<String>,
    pub url: Option<String>,
}

pub type SharedSurface = Rc<RefCell<MockSurfaceState>>;

pub struct MockSurface {
    id: TabId,
    state: SharedSurface,
    log: CallLog,
}

impl MockSurface {
    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl ContentSurface for MockSurface {
    fn navigate(&mut self, url: &str) {
        self.record(Call::Navigate(self.id, url.to_string()));
    }

    fn reload(&mut self) {
        self.record(Call::Reload(self.id));
        let mut state = self.state.borrow_mut();
        if state.ready {
            state.loading = true;
        }
    }

    fn stop(&mut self) {
        self.record(Call::Stop(self.id));
        self.state.borrow_mut().loading = false;
    }

    fn can_go_back(&self) -> Result<bool> {
        self.record(Call::QueryBack(self.id));
        let state = self.state.borrow();
        if !state.ready {
            return Err(CasementError::SurfaceNotReady(self.id));
        }
        Ok(state.can_back)
    }

    fn can_go_forward(&self) -> Result<bool> {
        self.record(Call::QueryForward(self.id));
        let state = self.state.borrow();
        if !state.ready {
            return Err(CasementError::SurfaceNotReady(self.id));
        }
        Ok(state.can_forward)
    }

    fn go_back(&mut self) {
        self.record(Call::GoBack(self.id));
    }

    fn go_forward(&mut self) {
        self.record(Call::GoForward(self.id));
    }

    fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    fn is_loading_in_flight(&self) -> bool {
        self.state.borrow().loading
    }

    fn title(&self) -> Option<String> {
        self.state.borrow().title.clone()
    }

    fn url(&self) -> Option<String> {
        self.state.borrow().url.clone()
    }

    fn activate(&mut self) {
        self.record(Call::Activate(self.id));
    }

    fn deactivate(&mut self) {
        self.record(Call::Deactivate(self.id));
    }

    fn close(&mut self) {
        self.record(Call::CloseSurface(self.id));
    }
}

pub struct MockFactory {
    log: CallLog,
    surfaces: Rc<RefCell<HashMap<TabId, SharedSurface>>>,
}

impl SurfaceFactory for MockFactory {
    fn create_surface(&mut self, id: TabId) -> Box<dyn ContentSurface> {
        let state = SharedSurface::default();
        self.surfaces.borrow_mut().insert(id, Rc::clone(&state));
        Box::new(MockSurface {
            id,
            state,
            log: Rc::clone(&self.log),
        })
    }
}

pub struct MockNavChrome {
    log: CallLog,
}

impl NavigationChrome for MockNavChrome {
    fn set_back_enabled(&mut self, enabled: bool) {
        self.log.borrow_mut().push(Call::BackEnabled(enabled));
    }

    fn set_forward_enabled(&mut self, enabled: bool) {
        self.log.borrow_mut().push(Call::ForwardEnabled(enabled));
    }

    fn show_stop_control(&mut self) {
        self.log.borrow_mut().push(Call::ShowStop);
    }

    fn show_reload_control(&mut self) {
        self.log.borrow_mut().push(Call::ShowReload);
    }
}

pub struct MockAddressBar {
    log: CallLog,
    focused: Rc<Cell<bool>>,
}

impl AddressBar for MockAddressBar {
    fn set_url(&mut self, url: &str) {
        self.log.borrow_mut().push(Call::SetUrl(url.to_string()));
    }

    fn set_window_title(&mut self, title: &str) {
        self.log.borrow_mut().push(Call::SetTitle(title.to_string()));
    }

    fn focus_input(&mut self) {
        self.focused.set(true);
        self.log.borrow_mut().push(Call::FocusInput);
    }

    fn is_input_focused(&self) -> bool {
        self.focused.get()
    }
}

pub struct MockHost {
    log: CallLog,
}

impl WindowHost for MockHost {
    fn close_window(&mut self) {
        self.log.borrow_mut().push(Call::CloseWindow);
    }
}

/// Owns the shared log and surface table for one test.
#[derive(Default)]
pub struct Harness {
    pub log: CallLog,
    surfaces: Rc<RefCell<HashMap<TabId, SharedSurface>>>,
    pub focused: Rc<Cell<bool>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(&self) -> MockFactory {
        MockFactory {
            log: Rc::clone(&self.log),
            surfaces: Rc::clone(&self.surfaces),
        }
    }

    pub fn nav_chrome(&self) -> MockNavChrome {
        MockNavChrome {
            log: Rc::clone(&self.log),
        }
    }

    pub fn address_bar(&self) -> MockAddressBar {
        MockAddressBar {
            log: Rc::clone(&self.log),
            focused: Rc::clone(&self.focused),
        }
    }

    pub fn host(&self) -> MockHost {
        MockHost {
            log: Rc::clone(&self.log),
        }
    }

    /// Build a controller wired to this harness's doubles.
    pub fn controller(&self, config: WindowConfig) -> BrowserWindowController {
        BrowserWindowController::new(
            config,
            Box::new(self.factory()),
            Box::new(self.nav_chrome()),
            Box::new(self.address_bar()),
            Box::new(self.host()),
        )
    }

    /// Scriptable state of the surface created for `id`.
    pub fn surface(&self, id: TabId) -> SharedSurface {
        let surfaces = self.surfaces.borrow();
        Rc::clone(surfaces.get(&id).expect("surface was never created"))
    }

    /// Build a standalone surface (outside any controller).
    pub fn make_surface(&self, id: TabId) -> Box<dyn ContentSurface> {
        self.factory().create_surface(id)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.log.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn has(&self, call: &Call) -> bool {
        self.log.borrow().contains(call)
    }
}
