//! Active tab tracking.

use casement_types::{CasementError, Result, TabId};

use crate::chrome::WindowChromeSync;
use crate::registry::TabRegistry;

/// Outcome of an activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The tab was already active. No effects ran.
    Unchanged,
    /// The active tab changed.
    Switched { previous: Option<TabId> },
}

/// Holds the single active tab reference.
///
/// The reference lives in one `Option`, so at most one tab is ever active,
/// and it is only written here.
#[derive(Debug, Default)]
pub struct ActiveTabTracker {
    active: Option<TabId>,
}

impl ActiveTabTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<TabId> {
        self.active
    }

    pub fn is_active(&self, id: TabId) -> bool {
        self.active == Some(id)
    }

    /// Make `id` the active tab.
    ///
    /// The previous tab's surface is deactivated before the new one is
    /// activated, then the chrome is resynced. Activating the tab that is
    /// already active does nothing.
    pub fn activate(
        &mut self,
        id: TabId,
        registry: &mut TabRegistry,
        chrome: &mut WindowChromeSync,
    ) -> Result<Activation> {
        if self.active == Some(id) {
            return Ok(Activation::Unchanged);
        }
        if !registry.contains(id) {
            return Err(CasementError::NotFound(id));
        }

        let previous = self.active;
        if let Some(prev) = previous {
            match registry.surface_mut(prev) {
                Ok(surface) => surface.deactivate(),
                Err(_) => log::warn!("Previously active tab {prev} is gone"),
            }
        }

        self.active = Some(id);
        registry.surface_mut(id)?.activate();
        log::debug!("Active tab {previous:?} -> {id}");

        chrome.resync(self.active, registry);
        Ok(Activation::Switched { previous })
    }

    /// Drop the active reference if it points at `id`.
    ///
    /// Returns true when the reference was cleared.
    pub fn release(&mut self, id: TabId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
