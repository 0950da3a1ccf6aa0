//! XP and Level system
//!
//! Levels cost exponentially more XP: advancing from level `n` to `n + 1`
//! costs `floor(100 * 1.5^(n-1))`. All arithmetic is done on integers so the
//! floor never depends on float rounding.

use serde::Serialize;

/// XP needed to leave level 1
pub const BASE_LEVEL_COST: u64 = 100;

/// XP cost to advance *from* `level` to `level + 1`.
///
/// Level 0 is treated as level 1. Costs are exact for every level whose cost
/// fits in a u64 (through level 99) and saturate at `u64::MAX` after that.
pub fn xp_cost_for_level(level: u32) -> u64 {
    let exponent = level.max(1) - 1;

    // Multiply by 3/2 one step at a time, keeping 100 * 1.5^n as
    // `whole + fraction / 2^n` so no power of 3 is ever materialized.
    let mut whole = BASE_LEVEL_COST as u128;
    let mut fraction = 0u128;
    for n in 0..exponent {
        let spill = ((whole % 2) << n) + 3 * fraction;
        let denominator = 1u128 << (n + 1);
        whole = 3 * whole / 2 + spill / denominator;
        fraction = spill % denominator;
        if whole > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    whole as u64
}

/// Total XP spent to reach `level` from level 1 (sum of the costs below it).
pub fn cumulative_cost_below(level: u32) -> u64 {
    (1..level.max(1)).fold(0u64, |acc, l| acc.saturating_add(xp_cost_for_level(l)))
}

/// Highest level fully paid for by `xp`. Zero XP is level 1.
pub fn level_from_xp(xp: u64) -> u32 {
    let mut level = 1u32;
    let mut remaining = xp;

    loop {
        let cost = xp_cost_for_level(level);
        if remaining < cost || level == u32::MAX {
            return level;
        }
        remaining -= cost;
        level += 1;
    }
}

/// Progress through `level` towards the next one, in `[0, 1]`.
pub fn level_progress(xp: u64, level: u32) -> f64 {
    let into_level = xp.saturating_sub(cumulative_cost_below(level));
    let cost = xp_cost_for_level(level);
    if cost == 0 {
        return 1.0;
    }
    (into_level as f64 / cost as f64).clamp(0.0, 1.0)
}

/// Level snapshot derived from total XP
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelInfo {
    pub total_xp: u64,
    pub level: u32,
    /// XP earned since reaching the current level
    pub xp_into_level: u64,
    /// XP the current level costs to complete
    pub xp_for_next: u64,
}

impl LevelInfo {
    pub fn new(total_xp: u64) -> Self {
        let level = level_from_xp(total_xp);
        Self {
            total_xp,
            level,
            xp_into_level: total_xp.saturating_sub(cumulative_cost_below(level)),
            xp_for_next: xp_cost_for_level(level),
        }
    }

    /// Progress to next level (0.0 - 1.0)
    pub fn progress(&self) -> f64 {
        level_progress(self.total_xp, self.level)
    }

    /// XP still missing before the next level-up
    pub fn xp_remaining(&self) -> u64 {
        self.xp_for_next.saturating_sub(self.xp_into_level)
    }
}
