//! Internal default configurations embedded at compile-time
//!
//! This module embeds the built-in VIP tiers and achievements from
//! `assets/internal/defaults.toml` and merges them into user configurations.

use serde::Deserialize;

use crate::stats::achievements::{AchievementDef, VipTier};

/// Embedded defaults TOML content (compile-time)
pub const INTERNAL_DEFAULTS_TOML: &str = include_str!("../../assets/internal/defaults.toml");

/// Internal defaults structure matching the TOML format
#[derive(Debug, Clone, Deserialize)]
pub struct InternalDefaults {
    #[serde(default)]
    pub tier: Vec<VipTier>,
    #[serde(default)]
    pub achievement: Vec<AchievementDef>,
}

impl InternalDefaults {
    /// Parse the embedded defaults TOML
    pub fn load() -> Result<Self, toml::de::Error> {
        toml::from_str(INTERNAL_DEFAULTS_TOML)
    }

    /// Merge internal defaults into a config's catalogs.
    ///
    /// - An empty tier list is replaced by the built-in tiers; a user tier
    ///   list is never mixed with built-in entries
    /// - Built-in achievements whose key is missing are appended
    ///
    /// Returns true if anything was added.
    pub fn merge_into(&self, tiers: &mut Vec<VipTier>, achievements: &mut Vec<AchievementDef>) -> bool {
        let mut changed = false;

        if tiers.is_empty() && !self.tier.is_empty() {
            tiers.extend(self.tier.iter().cloned());
            changed = true;
        }

        for internal in &self.achievement {
            if !achievements.iter().any(|a| a.key == internal.key) {
                achievements.push(internal.clone());
                changed = true;
            }
        }

        changed
    }
}
