//! Achievement definitions and metadata
//!
//! Achievements are data: the catalog is loaded from configuration at
//! startup and handed to the checker. Nothing here hard-codes thresholds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::fees::sol_to_lamports;

/// Which running total an achievement threshold is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    SolRecovered,
    AccountsClosed,
    Transactions,
    Referrals,
}

impl RequirementType {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SolRecovered => "sol_recovered",
            Self::AccountsClosed => "accounts_closed",
            Self::Transactions => "transactions",
            Self::Referrals => "referrals",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sol_recovered" => Some(Self::SolRecovered),
            "accounts_closed" => Some(Self::AccountsClosed),
            "transactions" => Some(Self::Transactions),
            "referrals" => Some(Self::Referrals),
            _ => None,
        }
    }

    /// Integer threshold a running total must reach. SOL values become
    /// lamports; counts round up so 2.5 transactions means 3.
    pub fn threshold(&self, requirement_value: f64) -> u64 {
        match self {
            Self::SolRecovered => sol_to_lamports(requirement_value).unwrap_or(u64::MAX),
            _ => requirement_value.ceil() as u64,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SolRecovered => "SOL recovered",
            Self::AccountsClosed => "Accounts closed",
            Self::Transactions => "Transactions",
            Self::Referrals => "Referrals",
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub key: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub requirement_type: RequirementType,
    pub requirement_value: f64,
    pub xp_reward: u64,
}

#[derive(Debug, Error, PartialEq)]
pub enum AchievementCatalogError {
    #[error("achievement key must not be empty")]
    EmptyKey,

    #[error("duplicate achievement key '{0}'")]
    DuplicateKey(String),

    #[error("achievement '{0}' has an invalid requirement value")]
    InvalidRequirement(String),
}

/// Validated achievement catalog, kept in evaluation order
/// (ascending requirement value, then key).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AchievementCatalog {
    achievements: Vec<AchievementDef>,
    /// Integer threshold of each entry, parallel to `achievements`
    #[serde(skip)]
    thresholds: Vec<u64>,
}

impl AchievementCatalog {
    pub fn new(mut achievements: Vec<AchievementDef>) -> Result<Self, AchievementCatalogError> {
        let mut seen = HashSet::new();
        for a in &achievements {
            if a.key.trim().is_empty() {
                return Err(AchievementCatalogError::EmptyKey);
            }
            if !seen.insert(a.key.as_str()) {
                return Err(AchievementCatalogError::DuplicateKey(a.key.clone()));
            }
            if !a.requirement_value.is_finite() || a.requirement_value < 0.0 {
                return Err(AchievementCatalogError::InvalidRequirement(a.key.clone()));
            }
        }

        achievements.sort_by(|a, b| {
            a.requirement_value
                .total_cmp(&b.requirement_value)
                .then_with(|| a.key.cmp(&b.key))
        });
        let thresholds = achievements
            .iter()
            .map(|a| a.requirement_type.threshold(a.requirement_value))
            .collect();
        Ok(Self {
            achievements,
            thresholds,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &AchievementDef> {
        self.achievements.iter()
    }

    /// Entries paired with their integer thresholds, in evaluation order
    pub fn iter_thresholds(&self) -> impl Iterator<Item = (&AchievementDef, u64)> {
        self.achievements.iter().zip(self.thresholds.iter().copied())
    }

    pub fn get(&self, key: &str) -> Option<&AchievementDef> {
        self.achievements.iter().find(|a| a.key == key)
    }

    /// Get total number of achievements
    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }

    /// Get total possible XP from all achievements
    pub fn total_xp(&self) -> u64 {
        self.achievements.iter().map(|a| a.xp_reward).sum()
    }
}

#[cfg(test)]
pub(crate) fn achievement(
    key: &str,
    requirement_type: RequirementType,
    requirement_value: f64,
    xp_reward: u64,
) -> AchievementDef {
    AchievementDef {
        key: key.to_string(),
        name: key.to_string(),
        description: String::new(),
        icon: String::new(),
        requirement_type,
        requirement_value,
        xp_reward,
    }
}
