//! Gamification system: XP, Levels, VIP tiers, Achievements and Streaks
//!
//! The pure pieces (levels, tiers, checker, streaks) never touch the
//! database; `manager` applies them to persisted wallet stats.

mod checker;
mod definitions;
mod levels;
mod manager;
mod streaks;
mod tiers;

pub use checker::{check_achievements, xp_for, ProgressTotals};
pub use definitions::{
    AchievementCatalog, AchievementCatalogError, AchievementDef, RequirementType,
};
pub use levels::{
    cumulative_cost_below, level_from_xp, level_progress, xp_cost_for_level, LevelInfo,
    BASE_LEVEL_COST,
};
pub use manager::ProgressionManager;
pub use streaks::{day_string, today, StreakInfo};
pub use tiers::{TierCatalog, TierCatalogError, VipTier};

#[cfg(test)]
pub(crate) use definitions::achievement;
#[cfg(test)]
pub(crate) use tiers::sample_tiers;

/// Validated tier and achievement catalogs, loaded once at startup
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub tiers: TierCatalog,
    pub achievements: AchievementCatalog,
}

impl Catalogs {
    pub fn new(tiers: TierCatalog, achievements: AchievementCatalog) -> Self {
        Self {
            tiers,
            achievements,
        }
    }
}
