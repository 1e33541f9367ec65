use crate::api::VaultApi;
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "BOOK_VAULT_HOME";

pub struct VaultContext {
    pub api: VaultApi<FileStore>,
    pub config: VaultConfig,
    pub data_dir: PathBuf,
}

/// Picks the vault directory: an explicit path wins, then `BOOK_VAULT_HOME`,
/// then the platform data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("com", "bookvault", "bookvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::Config("Could not determine data dir".to_string()))
}

pub fn initialize(data_dir: &Path) -> Result<VaultContext> {
    let config = VaultConfig::load(data_dir)?;
    log::debug!("vault at {} ({} search)", data_dir.display(), config.search_mode);

    let store = FileStore::new(data_dir.to_path_buf());
    let api = VaultApi::new(store, data_dir.to_path_buf(), config.clone());

    Ok(VaultContext {
        api,
        config,
        data_dir: data_dir.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchMode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_dir_wins() {
        let temp = TempDir::new().unwrap();
        let dir = resolve_data_dir(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(dir, temp.path());
    }

    #[test]
    fn test_initialize_fresh_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.config, VaultConfig::default());
        assert_eq!(ctx.data_dir, temp.path());
        assert!(ctx.api.list_records(None).unwrap().listed_records.is_empty());
    }

    #[test]
    fn test_initialize_reads_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), r#"{"search_mode":"advanced"}"#).unwrap();
        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.config.search_mode, SearchMode::Advanced);
        assert_eq!(ctx.api.current_config().search_mode, SearchMode::Advanced);
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), "{ nope").unwrap();
        assert!(matches!(
            initialize(temp.path()),
            Err(VaultError::Serialization(_))
        ));
    }
}
