//! Foundation types for Casement.
//!
//! This crate holds the platform-agnostic types shared by every Casement
//! crate: tab identifiers, the error taxonomy, window configuration, and the
//! input command vocabulary that shortcut and IPC layers translate into.

pub mod config;
pub mod error;
pub mod id;
pub mod input;

pub use config::WindowConfig;
pub use error::{CasementError, Result};
pub use id::TabId;
pub use input::WindowCommand;
