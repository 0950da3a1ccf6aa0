//! Data models for progression tracking
//!
//! These structures represent the data stored in and queried from the
//! reclaim database, and the outcomes handed to the presentation layer.

use serde::{Deserialize, Serialize};

use super::achievements::{AchievementDef, LevelInfo, ProgressTotals, StreakInfo, VipTier};
use super::error::ReclaimError;
use super::fees::{lamports_to_sol, FeeQuote};
use super::wallet::WalletKind;

/// Per-wallet running totals and progression state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub wallet_address: String,
    pub total_lamports_recovered: u64,
    pub total_accounts_closed: u64,
    pub total_transactions: u64,
    pub current_level: u32,
    pub current_xp: u64,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub referral_count: u64,
    pub streak: StreakInfo,
    /// Timestamps (ms since epoch)
    pub created_at: i64,
    pub updated_at: i64,
}

impl UserStats {
    /// Totals as the achievement checker sees them
    pub fn totals(&self) -> ProgressTotals {
        ProgressTotals {
            lamports_recovered: self.total_lamports_recovered,
            accounts_closed: self.total_accounts_closed,
            transactions: self.total_transactions,
            referrals: self.referral_count,
        }
    }

    pub fn level_info(&self) -> LevelInfo {
        LevelInfo::new(self.current_xp)
    }

    pub fn total_sol(&self) -> f64 {
        lamports_to_sol(self.total_lamports_recovered)
    }
}

/// A confirmed on-chain recovery reported by the wallet layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedTransaction {
    pub signature: String,
    pub accounts_closed: u64,
    pub sol_recovered: f64,
}

/// An achievement that was just unlocked
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnlockedAchievement {
    pub achievement: AchievementDef,
    pub unlocked_at: i64,
}

/// A level up event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// Result of applying one confirmed transaction
#[derive(Debug, Clone, Serialize)]
pub struct TransactionOutcome {
    pub stats: UserStats,
    pub new_unlocks: Vec<UnlockedAchievement>,
    pub xp_gained: u64,
    pub level_up: Option<LevelUp>,
    /// Tier (and fee) that applies to the wallet's next transaction
    pub tier: VipTier,
    pub tier_changed: bool,
}

impl TransactionOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level_up.is_some()
    }
}

/// Result of a referral code application as reported to the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferralOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReferralOutcome {
    pub fn from_result(result: &Result<(), ReclaimError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                error: None,
            },
            Err(e) => Self {
                success: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// One recorded recovery (ledger row)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecoveryRecord {
    pub signature: String,
    pub wallet_address: String,
    pub accounts_closed: u64,
    pub lamports_recovered: u64,
    pub fee_percent: f64,
    pub xp_gained: u64,
    pub recorded_at: i64,
}

impl RecoveryRecord {
    pub fn sol(&self) -> f64 {
        lamports_to_sol(self.lamports_recovered)
    }
}

/// Everything the profile view shows for one wallet
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub stats: UserStats,
    pub wallet_kind: WalletKind,
    pub level: LevelInfo,
    pub tier: VipTier,
    pub tier_index: usize,
    pub next_tier: Option<VipTier>,
    /// Fee percent charged on the next transaction
    pub fee_percent: f64,
    pub unlocked: Vec<UnlockedAchievement>,
    pub achievements_total: usize,
    /// Streak as of today (zero once a day was missed)
    pub active_streak: u32,
}

/// Leaderboard row ordered by lifetime SOL recovered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub wallet_address: String,
    pub total_lamports_recovered: u64,
    pub total_accounts_closed: u64,
    pub current_level: u32,
}

impl LeaderboardEntry {
    pub fn total_sol(&self) -> f64 {
        lamports_to_sol(self.total_lamports_recovered)
    }
}

/// Fee quote for a wallet's next transaction
#[derive(Debug, Clone, Serialize)]
pub struct WalletQuote {
    pub wallet_address: String,
    pub tier: VipTier,
    pub quote: FeeQuote,
}
