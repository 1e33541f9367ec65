//! # Configuration
//!
//! Stored as `config.json` next to the records in the data directory. Every
//! key has a serde default, so a missing file or a partial file both load.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `search_mode` | `auto` | `auto` sniffs `* ? [ (`; `literal` / `advanced` force a mode |
//! | `pages_target` | `2000` | Monthly pages goal shown by `stats` |
//! | `books_target` | `24` | Yearly books goal shown by `stats` |
//! | `page_unit` | `pages` | Unit for the reading total: `pages`, `chapters`, `hours` |

use crate::error::{Result, VaultError};
use crate::query::SearchMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PAGES_TARGET: u32 = 2000;
const DEFAULT_BOOKS_TARGET: u32 = 24;

pub const CONFIG_KEYS: [&str; 4] = ["search_mode", "pages_target", "books_target", "page_unit"];

/// Unit used when reporting the total amount read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageUnit {
    #[default]
    Pages,
    Chapters,
    Hours,
}

impl PageUnit {
    /// Pages that make up one unit.
    pub fn pages_per_unit(&self) -> u32 {
        match self {
            PageUnit::Pages => 1,
            PageUnit::Chapters => 20,
            PageUnit::Hours => 50,
        }
    }

    pub fn convert(&self, pages: u64) -> f64 {
        pages as f64 / self.pages_per_unit() as f64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageUnit::Pages => "pages",
            PageUnit::Chapters => "chapters",
            PageUnit::Hours => "hours",
        }
    }
}

impl std::fmt::Display for PageUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PageUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pages" => Ok(PageUnit::Pages),
            "chapters" => Ok(PageUnit::Chapters),
            "hours" => Ok(PageUnit::Hours),
            _ => Err(format!(
                "Invalid page unit '{}' (expected pages, chapters or hours)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    #[serde(default)]
    pub search_mode: SearchMode,

    #[serde(default = "default_pages_target")]
    pub pages_target: u32,

    #[serde(default = "default_books_target")]
    pub books_target: u32,

    #[serde(default)]
    pub page_unit: PageUnit,
}

fn default_pages_target() -> u32 {
    DEFAULT_PAGES_TARGET
}

fn default_books_target() -> u32 {
    DEFAULT_BOOKS_TARGET
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            search_mode: SearchMode::default(),
            pages_target: DEFAULT_PAGES_TARGET,
            books_target: DEFAULT_BOOKS_TARGET,
            page_unit: PageUnit::default(),
        }
    }
}

impl VaultConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VaultError::Io)?;
        let config: VaultConfig =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VaultError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VaultError::Serialization)?;
        fs::write(config_path, content).map_err(VaultError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "search_mode" => Some(self.search_mode.to_string()),
            "pages_target" => Some(self.pages_target.to_string()),
            "books_target" => Some(self.books_target.to_string()),
            "page_unit" => Some(self.page_unit.to_string()),
            _ => None,
        }
    }

    /// Sets `key` from its textual form. Targets must be positive.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "search_mode" => self.search_mode = value.parse()?,
            "pages_target" => self.pages_target = parse_target(key, value)?,
            "books_target" => self.books_target = parse_target(key, value)?,
            "page_unit" => self.page_unit = value.parse()?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

fn parse_target(key: &str, value: &str) -> std::result::Result<u32, String> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} must be a positive whole number, got '{}'", key, value)),
    }
}
