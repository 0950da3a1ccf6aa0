//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stats::ReferralSettings;

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite database location (defaults to ~/.sol-reclaim/reclaim.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Length of generated referral codes
    #[serde(default = "default_referral_code_length")]
    pub referral_code_length: usize,

    /// How many random codes to try before giving up on a collision streak
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: u32,
}

fn default_referral_code_length() -> usize {
    8
}

fn default_max_code_attempts() -> u32 {
    8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            referral_code_length: default_referral_code_length(),
            max_code_attempts: default_max_code_attempts(),
        }
    }
}

impl Settings {
    pub fn referral_settings(&self) -> ReferralSettings {
        ReferralSettings {
            code_length: self.referral_code_length,
            max_code_attempts: self.max_code_attempts,
        }
    }
}
