//! Tab registry: identity allocation and tab lifecycle.

use std::collections::HashMap;

use casement_types::{CasementError, Result, TabId};

use crate::surface::{ContentSurface, SurfaceEvent};
use crate::tab::{NavigationState, TabRecord};

/// A registered tab: its record plus the surface it exclusively owns.
struct TabSlot {
    record: TabRecord,
    surface: Box<dyn ContentSurface>,
}

/// Owns every open tab of the window.
///
/// `open_count()` always equals the number of registered tabs.
/// `created_count()` only grows. Ids come from their own counter, so a
/// closed tab's id is never handed out again.
pub struct TabRegistry {
    tabs: HashMap<TabId, TabSlot>,
    next_id: u64,
    created_count: u64,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self {
            tabs: HashMap::new(),
            next_id: 1,
            created_count: 0,
        }
    }

    /// The id the next [`create`](Self::create) will assign.
    ///
    /// The surface factory needs the id before the record exists.
    pub fn peek_next_id(&self) -> TabId {
        TabId::new(self.next_id)
    }

    /// Register a new tab in the `Blank`, not-loading state.
    ///
    /// Activation is left to the caller.
    pub fn create(&mut self, surface: Box<dyn ContentSurface>) -> TabId {
        let id = TabId::new(self.next_id);
        self.next_id += 1;
        self.created_count += 1;
        let record = TabRecord::new(id, self.created_count);
        self.tabs.insert(id, TabSlot { record, surface });
        log::debug!(
            "Tab {id} created ({} open, {} created)",
            self.tabs.len(),
            self.created_count
        );
        id
    }

    /// Tear down a tab's surface and drop its record.
    ///
    /// Safe to call on the active tab; re-selecting an active tab is the
    /// caller's job.
    pub fn close(&mut self, id: TabId) -> Result<()> {
        let slot = self.tabs.get_mut(&id).ok_or(CasementError::NotFound(id))?;
        slot.surface.close();
        self.tabs.remove(&id);
        log::debug!("Tab {id} closed ({} open)", self.tabs.len());
        Ok(())
    }

    pub fn get(&self, id: TabId) -> Result<&TabRecord> {
        self.tabs
            .get(&id)
            .map(|slot| &slot.record)
            .ok_or(CasementError::NotFound(id))
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.contains_key(&id)
    }

    pub fn surface(&self, id: TabId) -> Result<&dyn ContentSurface> {
        self.tabs
            .get(&id)
            .map(|slot| slot.surface.as_ref())
            .ok_or(CasementError::NotFound(id))
    }

    pub fn surface_mut(&mut self, id: TabId) -> Result<&mut dyn ContentSurface> {
        let slot = self.tabs.get_mut(&id).ok_or(CasementError::NotFound(id))?;
        Ok(slot.surface.as_mut())
    }

    /// Open tab ids in creation order.
    pub fn ids(&self) -> Vec<TabId> {
        let mut ids: Vec<TabId> = self.tabs.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn open_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn created_count(&self) -> u64 {
        self.created_count
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Record that a navigation to `url` was requested.
    pub fn mark_navigation_requested(&mut self, id: TabId, url: &str) -> Result<()> {
        let slot = self.tabs.get_mut(&id).ok_or(CasementError::NotFound(id))?;
        if slot.record.navigation_state == NavigationState::Blank {
            slot.record.navigation_state = NavigationState::Loading;
        }
        slot.record.requested_url = Some(url.to_string());
        Ok(())
    }

    /// Fold a surface notification into the tab's record.
    pub fn apply_event(&mut self, id: TabId, event: SurfaceEvent) -> Result<()> {
        let slot = self.tabs.get_mut(&id).ok_or(CasementError::NotFound(id))?;
        let record = &mut slot.record;
        match event {
            SurfaceEvent::Ready => record.navigation_state = NavigationState::Ready,
            SurfaceEvent::LoadStarted => record.loading = true,
            SurfaceEvent::LoadFinished => record.loading = false,
            SurfaceEvent::TitleChanged | SurfaceEvent::UrlChanged => {},
        }
        Ok(())
    }

    /// Re-read readiness and the in-flight flag from the surface, which is
    /// authoritative, and return the updated record.
    ///
    /// A record marked `Ready` whose surface says otherwise falls back to
    /// `Loading` (or `Blank` if nothing was ever requested).
    pub fn refresh(&mut self, id: TabId) -> Result<&TabRecord> {
        let slot = self.tabs.get_mut(&id).ok_or(CasementError::NotFound(id))?;
        let record = &mut slot.record;
        if slot.surface.is_ready() {
            record.navigation_state = NavigationState::Ready;
        } else if record.navigation_state == NavigationState::Ready {
            record.navigation_state = if record.requested_url.is_some() {
                NavigationState::Loading
            } else {
                NavigationState::Blank
            };
        }
        record.loading = slot.surface.is_loading_in_flight();
        slot.record.loading = slot.surface.is_loading_in_flight();
        Ok(&slot.record)
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}
