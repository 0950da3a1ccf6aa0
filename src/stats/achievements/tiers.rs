//! VIP fee tiers
//!
//! A wallet sits in the highest tier whose level AND lifetime-SOL thresholds
//! are both met. Tier data comes from configuration; this module only
//! evaluates it. SOL thresholds are compared in lamports.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::fees::sol_to_lamports;

/// One entry of the VIP tier catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VipTier {
    pub name: String,
    pub min_level: u32,
    pub min_sol: f64,
    /// Platform fee taken from recovered SOL, in percent
    pub fee_percent: f64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// Reasons a tier list cannot be used as a catalog
#[derive(Debug, Error, PartialEq)]
pub enum TierCatalogError {
    #[error("tier catalog is empty")]
    Empty,

    #[error("base tier '{0}' must require level 1 and 0 SOL")]
    BaseTierNotOpen(String),

    #[error("tier '{0}' has requirements below the tier before it")]
    NotAscending(String),

    #[error("tier '{name}' has invalid fee {fee}%")]
    InvalidFee { name: String, fee: f64 },

    #[error("tier '{0}' has an invalid SOL threshold")]
    InvalidThreshold(String),
}

/// Ordered, validated list of VIP tiers (index 0 is the base tier)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCatalog {
    tiers: Vec<VipTier>,
    /// `min_sol` of each tier, converted once
    #[serde(skip)]
    min_lamports: Vec<u64>,
}

impl TierCatalog {
    /// Validate and wrap a tier list ordered from base tier to top tier
    pub fn new(tiers: Vec<VipTier>) -> Result<Self, TierCatalogError> {
        let Some(base) = tiers.first() else {
            return Err(TierCatalogError::Empty);
        };
        if base.min_level > 1 || base.min_sol != 0.0 {
            return Err(TierCatalogError::BaseTierNotOpen(base.name.clone()));
        }

        let mut min_lamports = Vec::with_capacity(tiers.len());
        for tier in &tiers {
            let Ok(lamports) = sol_to_lamports(tier.min_sol) else {
                return Err(TierCatalogError::InvalidThreshold(tier.name.clone()));
            };
            min_lamports.push(lamports);
            if !tier.fee_percent.is_finite() || !(0.0..=100.0).contains(&tier.fee_percent) {
                return Err(TierCatalogError::InvalidFee {
                    name: tier.name.clone(),
                    fee: tier.fee_percent,
                });
            }
        }

        for pair in tiers.windows(2) {
            if pair[1].min_level < pair[0].min_level || pair[1].min_sol < pair[0].min_sol {
                return Err(TierCatalogError::NotAscending(pair[1].name.clone()));
            }
        }

        Ok(Self {
            tiers,
            min_lamports,
        })
    }

    pub fn tiers(&self) -> &[VipTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VipTier> {
        self.tiers.get(index)
    }

    /// Index of the highest tier whose level and SOL thresholds are both met
    pub fn tier_index(&self, level: u32, total_lamports: u64) -> usize {
        self.tiers
            .iter()
            .zip(&self.min_lamports)
            .rposition(|(t, &min)| level >= t.min_level && total_lamports >= min)
            .unwrap_or(0)
    }

    /// Tier record for a wallet's level and lifetime lamports recovered
    pub fn tier_for(&self, level: u32, total_lamports: u64) -> &VipTier {
        &self.tiers[self.tier_index(level, total_lamports)]
    }

    /// Fee percent of the tier at `index` (None if out of range)
    pub fn fee_for_tier(&self, index: usize) -> Option<f64> {
        self.tiers.get(index).map(|t| t.fee_percent)
    }

    /// The tier immediately above the wallet's current one (None at the top)
    pub fn next_tier(&self, level: u32, total_lamports: u64) -> Option<&VipTier> {
        self.tiers.get(self.tier_index(level, total_lamports) + 1)
    }
}

#[cfg(test)]
pub(crate) fn sample_tiers() -> Vec<VipTier> {
    let tier = |name: &str, min_level, min_sol, fee_percent| VipTier {
        name: name.to_string(),
        min_level,
        min_sol,
        fee_percent,
        icon: String::new(),
        benefits: vec![],
    };
    vec![
        tier("Bronze", 1, 0.0, 5.0),
        tier("Silver", 5, 5.0, 4.5),
        tier("Gold", 10, 25.0, 4.0),
        tier("Platinum", 20, 100.0, 3.5),
        tier("Diamond", 50, 500.0, 3.0),
    ]
}
