//! Configuration loading and management

mod internal;
mod io;
mod settings;

pub use internal::{InternalDefaults, INTERNAL_DEFAULTS_TOML};
pub use settings::Settings;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::stats::achievements::{
    AchievementCatalog, AchievementDef, Catalogs, TierCatalog, VipTier,
};

/// Shortest referral code the store will hand out
const MIN_REFERRAL_CODE_LENGTH: usize = 4;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// VIP tier catalog, base tier first
    #[serde(default)]
    pub tier: Vec<VipTier>,

    /// Achievement catalog
    #[serde(default)]
    pub achievement: Vec<AchievementDef>,
}

impl Config {
    /// Merge the embedded defaults into this config.
    ///
    /// Returns true if the config changed.
    pub fn merge_internal_defaults(&mut self) -> bool {
        match InternalDefaults::load() {
            Ok(defaults) => defaults.merge_into(&mut self.tier, &mut self.achievement),
            Err(e) => {
                tracing::error!("Failed to parse internal defaults: {}", e);
                false
            }
        }
    }

    /// Build the validated tier and achievement catalogs
    pub fn catalogs(&self) -> Result<Catalogs> {
        self.validate_settings()?;
        let tiers = TierCatalog::new(self.tier.clone()).context("Invalid [[tier]] configuration")?;
        let achievements = AchievementCatalog::new(self.achievement.clone())
            .context("Invalid [[achievement]] configuration")?;
        Ok(Catalogs::new(tiers, achievements))
    }

    fn validate_settings(&self) -> Result<()> {
        if self.settings.referral_code_length < MIN_REFERRAL_CODE_LENGTH {
            bail!(
                "settings.referral_code_length must be at least {}",
                MIN_REFERRAL_CODE_LENGTH
            );
        }
        if self.settings.max_code_attempts == 0 {
            bail!("settings.max_code_attempts must be at least 1");
        }
        Ok(())
    }

    /// Database path from settings, or the default location
    pub fn database_path(&self) -> PathBuf {
        self.settings
            .database_path
            .clone()
            .unwrap_or_else(Self::default_database_path)
    }

    /// Default database location (~/.sol-reclaim/reclaim.db)
    pub fn default_database_path() -> PathBuf {
        Self::global_config_dir().join("reclaim.db")
    }
}
