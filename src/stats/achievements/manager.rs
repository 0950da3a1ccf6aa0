//! Progression Manager - applies confirmed recoveries to wallet stats
//!
//! One confirmed transaction becomes one SQLite transaction: totals, XP,
//! level, streak, unlock records and the ledger row commit together or
//! not at all.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rusqlite::{params, TransactionBehavior};
use tracing::{debug, info, warn};

use super::checker::{check_achievements, xp_for};
use super::levels::level_from_xp;
use super::streaks::today;
use super::Catalogs;
use crate::stats::db::ReclaimDb;
use crate::stats::error::{ReclaimError, ReclaimResult};
use crate::stats::fees::{quote_fee, sol_to_lamports};
use crate::stats::models::{
    CompletedTransaction, LevelUp, TransactionOutcome, UnlockedAchievement, UserStats,
    WalletQuote,
};
use crate::stats::referral::ReferralSettings;
use crate::stats::users;
use crate::stats::wallet::classify_wallet;

/// Main manager for wallet progression
#[derive(Clone)]
pub struct ProgressionManager {
    db: ReclaimDb,
    catalogs: Arc<Catalogs>,
    referral: ReferralSettings,
}

impl ProgressionManager {
    pub fn new(db: ReclaimDb, catalogs: Arc<Catalogs>, referral: ReferralSettings) -> Self {
        Self {
            db,
            catalogs,
            referral,
        }
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Current stats for a wallet, created with defaults on first interaction
    pub fn ensure_user(&self, wallet: &str) -> ReclaimResult<UserStats> {
        classify_wallet(wallet)?;
        let mut conn = self.db.conn();
        let txn = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let user =
            users::get_or_create(&txn, wallet, &self.referral, Utc::now().timestamp_millis())?;
        txn.commit()?;
        Ok(user)
    }

    /// Stats for a wallet without creating them
    pub fn get_user(&self, wallet: &str) -> ReclaimResult<Option<UserStats>> {
        let conn = self.db.conn();
        Ok(users::load_user(&conn, wallet)?)
    }

    /// Fee quote for the wallet's next transaction
    pub fn quote(&self, wallet: &str, gross_sol: f64) -> ReclaimResult<WalletQuote> {
        let user = self.ensure_user(wallet)?;
        let tier = self
            .catalogs
            .tiers
            .tier_for(user.current_level, user.total_lamports_recovered)
            .clone();
        let quote = quote_fee(gross_sol, tier.fee_percent)?;
        Ok(WalletQuote {
            wallet_address: user.wallet_address,
            tier,
            quote,
        })
    }

    /// Apply a confirmed transaction dated today
    pub fn record_transaction(
        &self,
        wallet: &str,
        tx: &CompletedTransaction,
    ) -> ReclaimResult<TransactionOutcome> {
        self.record_transaction_on(wallet, tx, today())
    }

    /// Apply a confirmed transaction, dating the activity on `day`
    pub fn record_transaction_on(
        &self,
        wallet: &str,
        tx: &CompletedTransaction,
        day: NaiveDate,
    ) -> ReclaimResult<TransactionOutcome> {
        classify_wallet(wallet)?;
        let lamports = sol_to_lamports(tx.sol_recovered)?;
        let signature = tx.signature.trim();
        if signature.is_empty() {
            return Err(ReclaimError::InvalidSignature(tx.signature.clone()));
        }
        let now = Utc::now().timestamp_millis();
        let tiers = &self.catalogs.tiers;

        let mut conn = self.db.conn();
        let txn = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let already_recorded: bool = txn.query_row(
            "SELECT EXISTS(SELECT 1 FROM recoveries WHERE signature = ?1)",
            params![signature],
            |r| r.get(0),
        )?;
        if already_recorded {
            warn!("Rejected {} for {}: already recorded", signature, wallet);
            return Err(ReclaimError::DuplicateTransaction(signature.to_string()));
        }

        let before = users::get_or_create(&txn, wallet, &self.referral, now)?;
        // Always re-read: a cached set could grant the same achievement twice
        let unlocked = users::unlocked_keys(&txn, wallet)?;

        let mut prospective = before.totals();
        prospective.lamports_recovered = prospective.lamports_recovered.saturating_add(lamports);
        prospective.accounts_closed = prospective.accounts_closed.saturating_add(tx.accounts_closed);
        prospective.transactions = prospective.transactions.saturating_add(1);

        let newly = check_achievements(&self.catalogs.achievements, &prospective, &unlocked);
        let xp_gained = xp_for(&newly);
        let new_xp = before.current_xp.saturating_add(xp_gained);
        let new_level = level_from_xp(new_xp);
        let streak = before.streak.record_activity(day);
        debug!(
            "{}: {} new unlocks, +{} XP, level {} -> {}",
            wallet,
            newly.len(),
            xp_gained,
            before.current_level,
            new_level
        );

        // The fee charged on this transaction was quoted from the tier held before it
        let old_tier = tiers.tier_index(before.current_level, before.total_lamports_recovered);
        let fee_percent = tiers.fee_for_tier(old_tier).unwrap_or_default();

        let updated = txn.execute(
            r#"UPDATE user_stats SET
                   total_lamports_recovered = ?1, total_accounts_closed = ?2, total_transactions = ?3,
                   current_xp = ?4, current_level = ?5,
                   current_streak = ?6, best_streak = ?7, last_active_day = ?8, updated_at = ?9
               WHERE wallet_address = ?10 AND current_xp = ?11 AND total_transactions = ?12"#,
            params![
                prospective.lamports_recovered,
                prospective.accounts_closed,
                prospective.transactions,
                new_xp,
                new_level,
                streak.current,
                streak.best,
                streak.last_activity_day,
                now,
                wallet,
                before.current_xp,
                before.total_transactions,
            ],
        )?;
        if updated != 1 {
            return Err(ReclaimError::Conflict(wallet.to_string()));
        }

        let mut new_unlocks = Vec::with_capacity(newly.len());
        for achievement in newly {
            txn.execute(
                r#"INSERT OR IGNORE INTO achievement_unlocks (wallet_address, achievement_key, unlocked_at)
                   VALUES (?1, ?2, ?3)"#,
                params![wallet, achievement.key, now],
            )?;
            new_unlocks.push(UnlockedAchievement {
                achievement: achievement.clone(),
                unlocked_at: now,
            });
        }

        txn.execute(
            r#"INSERT INTO recoveries
               (signature, wallet_address, accounts_closed, lamports_recovered, fee_percent, xp_gained, recorded_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
            params![signature, wallet, tx.accounts_closed, lamports, fee_percent, xp_gained, now],
        )?;

        let stats = users::load_user(&txn, wallet)?
            .ok_or(ReclaimError::Persistence(rusqlite::Error::QueryReturnedNoRows))?;
        txn.commit()?;

        info!(
            "Recorded {} for {}: {} accounts, {} lamports",
            signature, wallet, tx.accounts_closed, lamports
        );
        for unlock in &new_unlocks {
            info!(
                "{} unlocked '{}' (+{} XP)",
                wallet, unlock.achievement.name, unlock.achievement.xp_reward
            );
        }

        let level_up = (new_level > before.current_level).then(|| LevelUp {
            old_level: before.current_level,
            new_level,
        });
        if let Some(up) = &level_up {
            info!("{} reached level {}", wallet, up.new_level);
        }

        let new_tier = tiers.tier_index(stats.current_level, stats.total_lamports_recovered);
        let tier = tiers.tier_for(stats.current_level, stats.total_lamports_recovered).clone();

        Ok(TransactionOutcome {
            stats,
            new_unlocks,
            xp_gained,
            level_up,
            tier,
            tier_changed: new_tier != old_tier,
        })
    }
}
