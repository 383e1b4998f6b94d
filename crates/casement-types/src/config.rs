//! Window configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CasementError, Result};

/// Behaviour and presentation settings for one browser window.
///
/// Every field has a default, so a TOML file only needs to name the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// URL loaded into the tab the window seeds at construction.
    pub home_url: String,
    /// Title shown when the active page has none.
    pub default_title: String,
    /// Appended to the window title as `"<title> - <app_name>"`.
    pub app_name: Option<String>,
    /// Address bar text while a tab has no URL to show.
    pub url_placeholder: String,
    /// Skip chrome pushes that would repeat the last pushed state.
    pub skip_redundant_chrome: bool,
    /// Focus the address bar when a new tab is opened in the foreground.
    pub focus_address_bar_on_new_tab: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            home_url: "about:blank".to_string(),
            default_title: "New Tab".to_string(),
            app_name: Some("Casement".to_string()),
            url_placeholder: String::new(),
            skip_redundant_chrome: true,
            focus_address_bar_on_new_tab: true,
        }
    }
}

impl WindowConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded window config from {}", path.display());
        Ok(config)
    }

    /// Format the window title for a page title.
    pub fn window_title(&self, page_title: &str) -> String {
        match self.app_name.as_deref() {
            Some(app) if !app.is_empty() => format!("{page_title} - {app}"),
            _ => page_title.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.home_url.trim().is_empty() {
            return Err(CasementError::Config("home_url must not be empty".into()));
        }
        if self.default_title.trim().is_empty() {
            return Err(CasementError::Config(
                "default_title must not be empty".into(),
            ));
        }
        Ok(())
    }
}
