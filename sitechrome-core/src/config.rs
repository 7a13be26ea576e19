//! Markup hooks and storage keys.
//!
//! Defaults match the stock site templates. A page may override any subset
//! by embedding a JSON object; unspecified fields keep their defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    pub theme: String,
    pub high_contrast: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "theme".to_string(),
            high_contrast: "highContrast".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    /// Selector of the menu region.
    pub menu: String,
    pub group: String,
    pub toggle: String,
    /// Class carried by an open group.
    pub open_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            menu: ".menu".to_string(),
            group: ".menu-group".to_string(),
            toggle: ".menu-toggle".to_string(),
            open_class: "open".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawerConfig {
    pub trigger_id: String,
    pub drawer_id: String,
    /// Class put on `<body>` while the drawer is open.
    pub open_class: String,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            trigger_id: "navToggle".to_string(),
            drawer_id: "primaryMenu".to_string(),
            open_class: "nav-open".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub theme_toggle_id: String,
    pub contrast_toggle_id: String,
    /// Attribute on the document root carrying the effective theme.
    pub attribute: String,
    /// Custom property holding the page background color.
    pub background_property: String,
    /// Chrome color used when the background property is empty.
    pub fallback_color: String,
    pub forced_colors_query: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            theme_toggle_id: "themeToggle".to_string(),
            contrast_toggle_id: "hcToggle".to_string(),
            attribute: "data-theme".to_string(),
            background_property: "--bg".to_string(),
            fallback_color: "#000".to_string(),
            forced_colors_query: "(forced-colors: active)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChromeConfig {
    pub menu: MenuConfig,
    pub drawer: DrawerConfig,
    pub theme: ThemeConfig,
    pub storage: StorageKeys,
    /// Id of the footer year element.
    pub year_id: String,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            menu: MenuConfig::default(),
            drawer: DrawerConfig::default(),
            theme: ThemeConfig::default(),
            storage: StorageKeys::default(),
            year_id: "year".to_string(),
        }
    }
}

impl ChromeConfig {
    /// Id of the embedded `<script type="application/json">` override block.
    pub const ELEMENT_ID: &'static str = "sitechrome-config";

    /// Parse an override block.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
