//! Error types for Casement.

use std::io;

use crate::id::TabId;

/// Errors produced by the Casement window core and its ambient layers.
#[derive(Debug, thiserror::Error)]
pub enum CasementError {
    /// An operation referenced a tab that is not in the registry.
    #[error("tab {0} not found")]
    NotFound(TabId),

    /// An operation needs an active tab but none is selected.
    #[error("no active tab")]
    NoActiveTab,

    /// A readiness-dependent query reached a surface that is not ready.
    #[error("content surface of tab {0} is not ready")]
    SurfaceNotReady(TabId),

    /// The window is tearing down and accepts no new tabs.
    #[error("window is closing")]
    WindowClosed,

    #[error("config error: {0}")]
    Config(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CasementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let e = CasementError::NotFound(TabId::new(3));
        assert_eq!(format!("{e}"), "tab #3 not found");
    }

    #[test]
    fn no_active_tab_display() {
        assert_eq!(format!("{}", CasementError::NoActiveTab), "no active tab");
    }

    #[test]
    fn surface_not_ready_display() {
        let e = CasementError::SurfaceNotReady(TabId::new(1));
        assert_eq!(format!("{e}"), "content surface of tab #1 is not ready");
    }

    #[test]
    fn window_closed_display() {
        assert_eq!(format!("{}", CasementError::WindowClosed), "window is closing");
    }

    #[test]
    fn command_error_display() {
        let e = CasementError::Command("unknown cmd".into());
        assert_eq!(format!("{e}"), "command error: unknown cmd");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: CasementError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: CasementError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: CasementError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(CasementError::NoActiveTab);
        assert!(matches!(r, Err(CasementError::NoActiveTab)));
    }
}
