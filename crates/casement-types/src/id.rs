//! Tab identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a tab within one window.
///
/// Identifiers are handed out by the tab registry from a strictly
/// increasing counter and are never reused during a window's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TabId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
