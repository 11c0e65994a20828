//! Menu configuration: parsing and the hot-reloadable store.
//!
//! The config file is optional — a missing file yields `MenuConfig::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos. Every
//! population pass snapshots the store once and treats that snapshot as
//! immutable for the duration of the pass.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::category::SortType;
use crate::menu::ScrollType;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read menu config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in menu config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Menu config too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level menu configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MenuConfig {
    pub gui_settings: GuiSettings,

    /// Static decorative entries. Only the key names matter to the engine;
    /// the renderer reads the full spec from `extra-items.<key>`.
    pub extra_items: BTreeMap<String, toml::Value>,
}

impl MenuConfig {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(MenuConfig::default())`
    /// - Empty file → `Ok(MenuConfig::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Menu config is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No menu config found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Menu config disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Menu config is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys.
        // `categories.<id>` sections are read by the element renderer, not by
        // the engine, so they count as known.
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["gui-settings", "extra-items", "categories"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in menu config, ignoring");
                }
            }
        }

        let config: MenuConfig = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            sort = %config.gui_settings.sort_type,
            dynamic = config.gui_settings.dynamic_gui,
            "Loaded menu configuration"
        );
        Ok(config)
    }
}

/// The `gui-settings` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GuiSettings {
    /// Menu title template. Supports `%page%` / `%pages%`.
    pub title: String,

    /// Container height for the paged variant.
    pub rows: u8,

    /// Use the scrolling container instead of the paged one.
    /// Only honored when a valid `scrolling-type` is also set.
    pub scrolling_gui: bool,

    #[serde(deserialize_with = "de_scroll_type")]
    pub scrolling_type: Option<ScrollType>,

    pub sort_type: SortType,

    /// Hide categories the viewer lacks the permission node for.
    pub use_category_permissions: bool,

    /// Hide categories with zero accessible tags for the viewer.
    pub only_unlocked_categories: bool,

    /// Repopulate the open view on an interval instead of once.
    pub dynamic_gui: bool,

    /// Refresh interval in milliseconds. 0 disables dynamic refresh even when
    /// `dynamic-gui` is set.
    pub dynamic_speed: u64,

    /// Cache rendered category elements across sessions. Disable when display
    /// specs embed per-viewer placeholders that must never be stale.
    pub cache_icons: bool,

    /// Run the one-shot population off the caller's execution path.
    /// Independent of `dynamic-gui`.
    pub add_pages_asynchronously: bool,

    /// Refresh the title (page placeholders) after population and page
    /// navigation.
    pub update_title: bool,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            title: "Category Menu".to_string(),
            rows: 6,
            scrolling_gui: false,
            scrolling_type: None,
            sort_type: SortType::default(),
            use_category_permissions: false,
            only_unlocked_categories: false,
            dynamic_gui: false,
            dynamic_speed: 150,
            cache_icons: true,
            add_pages_asynchronously: false,
            update_title: true,
        }
    }
}

/// An unrecognized scrolling-type falls back to the paged container rather
/// than failing the load.
fn de_scroll_type<'de, D>(deserializer: D) -> Result<Option<ScrollType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse() {
        Ok(st) => Some(st),
        Err(()) => {
            tracing::warn!(value = %s, "Unknown scrolling-type, using paged container");
            None
        }
    }))
}

// ============================================================================
// Hot-reloadable store
// ============================================================================

/// Shared handle to the current menu configuration.
///
/// Reads are cheap (`Arc` clone); `reload` re-reads the backing file in place
/// so open sessions pick the new values up on their next population pass.
pub struct ConfigStore {
    path: Option<PathBuf>,
    current: RwLock<Arc<MenuConfig>>,
}

impl ConfigStore {
    /// Load the store from a TOML file, remembering the path for reloads.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = MenuConfig::load(&path)?;
        Ok(Self {
            path: Some(path),
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Wrap an already-built config. `reload` keeps the given value.
    pub fn from_config(config: MenuConfig) -> Self {
        Self {
            path: None,
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Snapshot of the current configuration.
    pub fn current(&self) -> Arc<MenuConfig> {
        Arc::clone(&self.current.read())
    }

    /// Re-read the backing file. A parse failure leaves the previous
    /// configuration in place.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let config = MenuConfig::load(path)?;
        *self.current.write() = Arc::new(config);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
