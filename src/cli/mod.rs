//! CLI command implementations

pub mod catalog;
pub mod init;
pub mod leaderboard;
pub mod profile;
pub mod quote;
pub mod record;
pub mod referral;

use std::path::PathBuf;

use anyhow::{Context, Result};
use sol_reclaim::config::Config;
use sol_reclaim::stats::ReclaimManager;

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub db: Option<PathBuf>,
}

impl GlobalArgs {
    /// Config file in use: `--config` or ~/.sol-reclaim/config.toml
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::global_config_path)
    }

    /// Load the config, creating the default file on first run
    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path())
    }

    /// Open the reclaim database named by `--db` or the config
    pub fn open(&self) -> Result<ReclaimManager> {
        let config = self.load_config()?;
        let db_path = self.db.clone().unwrap_or_else(|| config.database_path());
        ReclaimManager::with_path(&db_path, &config)
            .with_context(|| format!("Failed to open reclaim database: {}", db_path.display()))
    }
}

/// Shorten wallet addresses for table output
pub(crate) fn short_wallet(wallet: &str) -> String {
    if wallet.chars().count() <= 16 {
        return wallet.to_string();
    }
    let head: String = wallet.chars().take(6).collect();
    let tail: String = wallet
        .chars()
        .rev()
        .take(6)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{}…{}", head, tail)
}

/// Render a ms timestamp in local time
pub(crate) fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Text progress bar for level progress
pub(crate) fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
