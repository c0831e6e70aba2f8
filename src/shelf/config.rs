use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORAGE_KEY: &str = "livros";

/// Configuration for shelf, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Name of the slot holding the collection
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Ask before deleting a book
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// The collection slot lands in `<data-dir>/<key>.json`, next to this file.
fn shadows_config_file(key: &str) -> bool {
    format!("{}.json", key).eq_ignore_ascii_case(CONFIG_FILENAME)
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl ShelfConfig {
    pub const KEYS: &'static [&'static str] = &["storage-key", "confirm-delete"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: ShelfConfig = serde_json::from_str(&content)?;
        if shadows_config_file(&config.storage_key) {
            warn!(key = %config.storage_key, "storage key collides with the config file; using default");
            config.storage_key = default_storage_key();
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage-key" => Some(self.storage_key.clone()),
            "confirm-delete" => Some(self.confirm_delete.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "storage-key" => {
                let value = value.trim();
                if value.is_empty() || value.contains(&['/', '\\'][..]) || value.starts_with('.') {
                    return Err(format!("Invalid storage key: {}", value));
                }
                if shadows_config_file(value) {
                    return Err(format!("Storage key is reserved: {}", value));
                }
                self.storage_key = value.to_string();
                Ok(())
            }
            "confirm-delete" => {
                self.confirm_delete = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("Expected true or false, got: {}", other)),
                };
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
