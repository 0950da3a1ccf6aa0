//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.sol-reclaim/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sol-reclaim")
    }

    /// Get the global config file path (~/.sol-reclaim/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file without merging internal defaults.
    pub(super) fn from_file_raw(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a file, merging internal defaults.
    ///
    /// Does NOT save the merged config. Use `Config::load_from()` for that.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_file_raw(path)?;
        config.merge_internal_defaults();
        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        let _lock = lock_config(path)?;
        write_atomic(path, &content)
        // Lock is released when _lock is dropped
    }

    /// Load global configuration from ~/.sol-reclaim/config.toml
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::global_config_path())
    }

    /// Load configuration from `path`, creating it with defaults if missing.
    /// Saves the file back if internal defaults added anything.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::auto_init(path)?;
        }

        let mut config = Self::from_file_raw(path)?;

        if config.merge_internal_defaults() {
            if let Err(e) = config.save_to_file(path) {
                tracing::warn!("Failed to save config after merging internal defaults: {}", e);
            }
        }

        Ok(config)
    }

    /// Write the default configuration to `path`.
    ///
    /// Returns false (and leaves the file alone) if it exists and `force` is not set.
    pub fn init_at(path: &Path, force: bool) -> Result<bool> {
        let _lock = lock_config(path)?;
        if path.exists() && !force {
            return Ok(false);
        }

        let content = toml::to_string_pretty(&Self::with_defaults())
            .with_context(|| "Failed to serialize default config")?;
        write_atomic(path, &content)?;
        Ok(true)
    }

    /// Auto-initialize configuration when no config exists
    ///
    /// Uses file locking so concurrent processes create the file once.
    fn auto_init(path: &Path) -> Result<()> {
        if Self::init_at(path, false)? {
            tracing::info!("Created {}", path.display());
        }
        Ok(())
    }

    /// Create a config populated from the embedded internal defaults.
    pub fn with_defaults() -> Self {
        let mut config = Self::default();
        config.merge_internal_defaults();
        config
    }
}

/// Acquire the exclusive lock file that guards `path` (separate from the
/// config itself so the rename does not invalidate it)
fn lock_config(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    Ok(lock_file)
}

/// Temp file + rename so a crash never leaves a half-written config
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::with_defaults());
    }

    #[test]
    fn test_init_respects_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\nreferral_code_length = 12\n").unwrap();

        assert!(!Config::init_at(&path, false).unwrap());
        assert_eq!(Config::from_file_raw(&path).unwrap().settings.referral_code_length, 12);

        assert!(Config::init_at(&path, true).unwrap());
        assert_eq!(Config::from_file_raw(&path).unwrap().settings.referral_code_length, 8);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::with_defaults();
        config.settings.max_code_attempts = 3;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
