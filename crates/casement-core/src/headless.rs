//! In-memory content surface.
//!
//! [`HeadlessSurface`] behaves like a real web view from the window core's
//! point of view (it needs setup before history queries are legal, loads
//! asynchronously and keeps a session history) but renders nothing. The
//! embedder drives its asynchronous side through a [`HeadlessHandle`] and
//! forwards the returned [`SurfaceEvent`]s to the controller.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use casement_types::{CasementError, Result, TabId};

use crate::history::SessionHistory;
use crate::surface::{ContentSurface, SurfaceEvent, SurfaceFactory};

#[derive(Debug, Default)]
struct HeadlessState {
    ready: bool,
    loading: bool,
    visible: bool,
    closed: bool,
    /// Navigation requested before setup finished.
    pending: Option<String>,
    history: SessionHistory,
}

impl HeadlessState {
    fn begin_load(&mut self, url: &str) {
        self.history.push(url);
        self.loading = true;
    }
}

/// A content surface with no rendering backend.
pub struct HeadlessSurface {
    id: TabId,
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessSurface {
    /// Create a surface and the handle that drives it.
    pub fn new(id: TabId) -> (Self, HeadlessHandle) {
        let state = Rc::new(RefCell::new(HeadlessState::default()));
        let handle = HeadlessHandle {
            id,
            state: Rc::clone(&state),
        };
        (Self { id, state }, handle)
    }
}

impl ContentSurface for HeadlessSurface {
    fn navigate(&mut self, url: &str) {
        let mut state = self.state.borrow_mut();
        if state.closed {
            log::warn!("Tab {}: navigate on closed surface ignored", self.id);
            return;
        }
        if state.ready {
            state.begin_load(url);
        } else {
            state.pending = Some(url.to_string());
        }
    }

    fn reload(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.ready && state.history.current().is_some() {
            state.loading = true;
        }
    }

    fn stop(&mut self) {
        self.state.borrow_mut().loading = false;
    }

    fn can_go_back(&self) -> Result<bool> {
        let state = self.state.borrow();
        if !state.ready {
            return Err(CasementError::SurfaceNotReady(self.id));
        }
        Ok(state.history.can_go_back())
    }

    fn can_go_forward(&self) -> Result<bool> {
        let state = self.state.borrow();
        if !state.ready {
            return Err(CasementError::SurfaceNotReady(self.id));
        }
        Ok(state.history.can_go_forward())
    }

    fn go_back(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.ready && state.history.go_back().is_some() {
            state.loading = true;
        }
    }

    fn go_forward(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.ready && state.history.go_forward().is_some() {
            state.loading = true;
        }
    }

    fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    fn is_loading_in_flight(&self) -> bool {
        self.state.borrow().loading
    }

    fn title(&self) -> Option<String> {
        let state = self.state.borrow();
        state
            .history
            .current()
            .map(|e| e.title.clone())
            .filter(|t| !t.is_empty())
    }

    fn url(&self) -> Option<String> {
        self.state.borrow().history.current_url().map(str::to_string)
    }

    fn activate(&mut self) {
        self.state.borrow_mut().visible = true;
    }

    fn deactivate(&mut self) {
        self.state.borrow_mut().visible = false;
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        state.closed = true;
        state.visible = false;
        state.loading = false;
        log::debug!("Tab {}: headless surface released", self.id);
    }
}

/// Drives the asynchronous side of a [`HeadlessSurface`].
///
/// Each simulation step returns the notifications the surface would emit,
/// in order.
#[derive(Debug, Clone)]
pub struct HeadlessHandle {
    id: TabId,
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessHandle {
    /// Finish initial setup. A navigation requested earlier starts loading.
    pub fn complete_setup(&self) -> Vec<SurfaceEvent> {
        let mut state = self.state.borrow_mut();
        if state.closed || state.ready {
            return Vec::new();
        }
        state.ready = true;
        log::debug!("Tab {}: headless surface ready", self.id);
        let mut events = vec![SurfaceEvent::Ready];
        if let Some(url) = state.pending.take() {
            state.begin_load(&url);
            events.push(SurfaceEvent::UrlChanged);
            events.push(SurfaceEvent::LoadStarted);
        }
        events
    }

    /// Report that a fetch started without a new navigation (e.g. a
    /// page-initiated reload).
    pub fn start_load(&self) -> Vec<SurfaceEvent> {
        let mut state = self.state.borrow_mut();
        if state.closed || state.loading {
            return Vec::new();
        }
        state.loading = true;
        vec![SurfaceEvent::LoadStarted]
    }

    /// Finish the in-flight fetch, optionally setting the page title.
    pub fn finish_load(&self, title: Option<&str>) -> Vec<SurfaceEvent> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Vec::new();
        }
        let mut events = Vec::new();
        if let Some(title) = title {
            state.history.update_title(title);
            events.push(SurfaceEvent::TitleChanged);
        }
        if state.loading {
            state.loading = false;
            events.push(SurfaceEvent::LoadFinished);
        }
        events
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }
}

/// Creates [`HeadlessSurface`]s and keeps their handles by tab id.
///
/// Clones share the handle table, so the embedder can keep one clone while
/// the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurfaceFactory {
    handles: Rc<RefCell<HashMap<TabId, HeadlessHandle>>>,
}

impl HeadlessSurfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self, id: TabId) -> Option<HeadlessHandle> {
        self.handles.borrow().get(&id).cloned()
    }

    /// Drop the handles of closed surfaces.
    pub fn prune_closed(&self) {
        self.handles.borrow_mut().retain(|_, h| !h.is_closed());
    }
}

impl SurfaceFactory for HeadlessSurfaceFactory {
    fn create_surface(&mut self, id: TabId) -> Box<dyn ContentSurface> {
        let (surface, handle) = HeadlessSurface::new(id);
        self.handles.borrow_mut().insert(id, handle);
        Box::new(surface)
    }
}
