//! Per-tab state record.

use casement_types::TabId;

/// Whether a tab's content surface can take navigation-state queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// Nothing has been requested yet.
    #[default]
    Blank,
    /// A navigation was requested but the surface has not finished setup.
    Loading,
    /// Setup finished. History queries, title and URL are available.
    Ready,
}

/// Identity and loading flags for one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRecord {
    pub id: TabId,
    /// 1-based position in creation order.
    pub creation_index: u64,
    pub navigation_state: NavigationState,
    /// A fetch for the current navigation is in flight. Independent of
    /// `navigation_state`: a ready tab loads again on every navigation.
    pub loading: bool,
    /// Last URL handed to the surface.
    pub requested_url: Option<String>,
}

impl TabRecord {
    pub fn new(id: TabId, creation_index: u64) -> Self {
        Self {
            id,
            creation_index,
            navigation_state: NavigationState::Blank,
            loading: false,
            requested_url: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.navigation_state == NavigationState::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_blank_and_idle() {
        let rec = TabRecord::new(TabId::new(1), 1);
        assert_eq!(rec.navigation_state, NavigationState::Blank);
        assert!(!rec.loading);
        assert!(!rec.is_ready());
        assert!(rec.requested_url.is_none());
    }

    #[test]
    fn ready_state_reports_ready() {
        let mut rec = TabRecord::new(TabId::new(1), 1);
        rec.navigation_state = NavigationState::Ready;
        assert!(rec.is_ready());
    }
}
