//! Chart preferences and their persistence.
//!
//! Preferences are stored as a flat key-value map so a host can keep them in
//! whatever store it already has. Each key is validated on its own when
//! loading: a corrupt value falls back to that key's default without
//! affecting the others.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

use crate::chart::density::DensityMode;

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while persisting preferences
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Config directory not found
    #[error("Config directory not available")]
    NoConfigDir,

    /// Failed to read or write the preferences file
    #[error("Failed to access preferences file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode preferences
    #[error("Failed to serialize preferences: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Preferences
// ============================================================================

/// Name of one stored preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum PreferenceKey {
    ShowMedian,
    ShowMin,
    ShowMax,
    ShowAvg,
    ShowSmoke,
    ShowPacketLoss,
    ShowStats,
    #[strum(serialize = "clip_to_p99")]
    ClipToP99,
    DensityMode,
}

impl PreferenceKey {
    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            PreferenceKey::ShowMedian => "Median line",
            PreferenceKey::ShowMin => "Min line",
            PreferenceKey::ShowMax => "Max line",
            PreferenceKey::ShowAvg => "Average line",
            PreferenceKey::ShowSmoke => "Smoke",
            PreferenceKey::ShowPacketLoss => "Packet loss",
            PreferenceKey::ShowStats => "Statistics panel",
            PreferenceKey::ClipToP99 => "Clip to p99",
            PreferenceKey::DensityMode => "Density mode",
        }
    }

    /// True for the boolean toggles
    pub fn is_flag(&self) -> bool {
        !matches!(self, PreferenceKey::DensityMode)
    }
}

/// Visibility and style options of one chart. The engine only reads them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPreferences {
    pub show_median: bool,
    pub show_min: bool,
    pub show_max: bool,
    pub show_avg: bool,
    pub show_smoke: bool,
    pub show_packet_loss: bool,
    pub show_stats: bool,
    pub clip_to_p99: bool,
    pub density_mode: DensityMode,
}

impl Default for ChartPreferences {
    fn default() -> Self {
        Self {
            show_median: true,
            show_min: false,
            show_max: false,
            show_avg: false,
            show_smoke: true,
            show_packet_loss: true,
            show_stats: true,
            clip_to_p99: false,
            density_mode: DensityMode::default(),
        }
    }
}

impl ChartPreferences {
    pub fn flag(&self, key: PreferenceKey) -> Option<bool> {
        self.flag_ref(key).copied()
    }

    fn flag_ref(&self, key: PreferenceKey) -> Option<&bool> {
        match key {
            PreferenceKey::ShowMedian => Some(&self.show_median),
            PreferenceKey::ShowMin => Some(&self.show_min),
            PreferenceKey::ShowMax => Some(&self.show_max),
            PreferenceKey::ShowAvg => Some(&self.show_avg),
            PreferenceKey::ShowSmoke => Some(&self.show_smoke),
            PreferenceKey::ShowPacketLoss => Some(&self.show_packet_loss),
            PreferenceKey::ShowStats => Some(&self.show_stats),
            PreferenceKey::ClipToP99 => Some(&self.clip_to_p99),
            PreferenceKey::DensityMode => None,
        }
    }

    /// Mutable access to a boolean toggle, `None` for non-boolean keys
    pub fn flag_mut(&mut self, key: PreferenceKey) -> Option<&mut bool> {
        match key {
            PreferenceKey::ShowMedian => Some(&mut self.show_median),
            PreferenceKey::ShowMin => Some(&mut self.show_min),
            PreferenceKey::ShowMax => Some(&mut self.show_max),
            PreferenceKey::ShowAvg => Some(&mut self.show_avg),
            PreferenceKey::ShowSmoke => Some(&mut self.show_smoke),
            PreferenceKey::ShowPacketLoss => Some(&mut self.show_packet_loss),
            PreferenceKey::ShowStats => Some(&mut self.show_stats),
            PreferenceKey::ClipToP99 => Some(&mut self.clip_to_p99),
            PreferenceKey::DensityMode => None,
        }
    }

    /// Stored representation of one preference
    pub fn value(&self, key: PreferenceKey) -> Value {
        match self.flag(key) {
            Some(flag) => Value::Bool(flag),
            None => Value::String(self.density_mode.to_string()),
        }
    }

    /// Apply a stored value. Returns false and leaves the preference
    /// untouched when the value has the wrong shape.
    pub fn apply(&mut self, key: PreferenceKey, value: &Value) -> bool {
        match self.flag_mut(key) {
            Some(flag) => match value.as_bool() {
                Some(v) => {
                    *flag = v;
                    true
                }
                None => false,
            },
            None => match value.as_str().and_then(|s| s.parse::<DensityMode>().ok()) {
                Some(mode) => {
                    self.density_mode = mode;
                    true
                }
                None => false,
            },
        }
    }

    /// Read every key from a store, falling back per key
    pub fn load_from(store: &dyn PreferenceStore) -> Self {
        let mut prefs = Self::default();
        for key in PreferenceKey::iter() {
            let Some(value) = store.get(key.as_ref()) else {
                continue;
            };
            if !prefs.apply(key, &value) {
                tracing::warn!("Ignoring invalid preference {} = {}", key, value);
            }
        }
        prefs
    }

    /// Write one key back to a store
    pub fn save_key(&self, key: PreferenceKey, store: &mut dyn PreferenceStore) -> Result<(), SettingsError> {
        store.set(key.as_ref(), self.value(key))
    }

    /// Write every key back to a store
    pub fn save_to(&self, store: &mut dyn PreferenceStore) -> Result<(), SettingsError> {
        for key in PreferenceKey::iter() {
            self.save_key(key, store)?;
        }
        Ok(())
    }
}

// ============================================================================
// Stores
// ============================================================================

/// Key-value collaborator holding the preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
}

/// Volatile store, used by tests and headless rendering
#[derive(Clone, Debug, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, Value>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a JSON object on disk; every `set` rewrites the file
#[derive(Clone, Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonPreferenceStore {
    /// Get the config directory path for pingsmoke
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("PingSmoke"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("PingSmoke"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|p| p.join("pingsmoke"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            dirs::config_dir().map(|p| p.join("pingsmoke"))
        }
    }

    /// Get the path to the preferences JSON file
    pub fn get_preferences_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("preferences.json"))
    }

    /// Open the store in the platform config directory
    pub fn open_default() -> Result<Self, SettingsError> {
        let path = Self::get_preferences_path().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::open(path))
    }

    /// Open a store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Discarding corrupt preferences file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save preferences to disk
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}
