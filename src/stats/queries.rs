//! Read-side queries: profiles, leaderboard and recovery history

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::Arc;

use super::achievements::{today, AchievementCatalog, Catalogs};
use super::db::ReclaimDb;
use super::error::{ReclaimError, ReclaimResult};
use super::models::{
    LeaderboardEntry, PlayerProfile, RecoveryRecord, UnlockedAchievement, UserStats,
};
use super::users;
use super::wallet::{classify_wallet, WalletKind};

/// Query interface for progression data
pub struct ReclaimQuery {
    db: ReclaimDb,
    catalogs: Arc<Catalogs>,
}

impl ReclaimQuery {
    pub fn new(db: ReclaimDb, catalogs: Arc<Catalogs>) -> Self {
        Self { db, catalogs }
    }

    /// Profile view for a wallet, `None` if it never interacted
    pub fn profile(&self, wallet: &str) -> ReclaimResult<Option<PlayerProfile>> {
        self.profile_on(wallet, today())
    }

    pub fn profile_on(&self, wallet: &str, day: NaiveDate) -> ReclaimResult<Option<PlayerProfile>> {
        let wallet_kind = classify_wallet(wallet)?;
        let conn = self.db.conn();
        let Some(stats) = users::load_user(&conn, wallet)? else {
            return Ok(None);
        };
        let unlocked = unlocked_achievements(&conn, &self.catalogs.achievements, wallet)?;
        drop(conn);

        Ok(Some(self.build_profile(stats, wallet_kind, unlocked, day)))
    }

    fn build_profile(
        &self,
        stats: UserStats,
        wallet_kind: WalletKind,
        unlocked: Vec<UnlockedAchievement>,
        day: NaiveDate,
    ) -> PlayerProfile {
        let tiers = &self.catalogs.tiers;
        let tier_index = tiers.tier_index(stats.current_level, stats.total_lamports_recovered);
        let tier = tiers.tier_for(stats.current_level, stats.total_lamports_recovered).clone();
        let next_tier = tiers
            .next_tier(stats.current_level, stats.total_lamports_recovered)
            .cloned();

        PlayerProfile {
            wallet_kind,
            level: stats.level_info(),
            fee_percent: tier.fee_percent,
            tier,
            tier_index,
            next_tier,
            achievements_total: self.catalogs.achievements.len(),
            active_streak: stats.streak.current_on(day),
            unlocked,
            stats,
        }
    }

    /// Achievements a wallet has unlocked, oldest first
    pub fn unlocked(&self, wallet: &str) -> ReclaimResult<Vec<UnlockedAchievement>> {
        classify_wallet(wallet)?;
        let conn = self.db.conn();
        Ok(unlocked_achievements(&conn, &self.catalogs.achievements, wallet)?)
    }

    /// Top wallets by lifetime SOL recovered
    pub fn leaderboard(&self, limit: usize) -> ReclaimResult<Vec<LeaderboardEntry>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"SELECT wallet_address, total_lamports_recovered, total_accounts_closed, current_level
               FROM user_stats
               WHERE total_transactions > 0
               ORDER BY total_lamports_recovered DESC, total_accounts_closed DESC, created_at ASC
               LIMIT ?1"#,
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, u32>(3)?,
            ))
        })?;

        let mut entries = Vec::new();
        for (i, row) in rows.enumerate() {
            let (wallet_address, total_lamports_recovered, total_accounts_closed, current_level) =
                row?;
            entries.push(LeaderboardEntry {
                rank: i + 1,
                wallet_address,
                total_lamports_recovered,
                total_accounts_closed,
                current_level,
            });
        }
        Ok(entries)
    }

    /// Most recent recoveries for a wallet, newest first
    pub fn history(&self, wallet: &str, limit: usize) -> ReclaimResult<Vec<RecoveryRecord>> {
        classify_wallet(wallet)?;
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"SELECT signature, wallet_address, accounts_closed, lamports_recovered,
                      fee_percent, xp_gained, recorded_at
               FROM recoveries
               WHERE wallet_address = ?1
               ORDER BY recorded_at DESC, rowid DESC
               LIMIT ?2"#,
        )?;

        let records = stmt
            .query_map(params![wallet, limit as i64], |row| {
                Ok(RecoveryRecord {
                    signature: row.get(0)?,
                    wallet_address: row.get(1)?,
                    accounts_closed: row.get(2)?,
                    lamports_recovered: row.get(3)?,
                    fee_percent: row.get(4)?,
                    xp_gained: row.get(5)?,
                    recorded_at: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(ReclaimError::from)?;
        Ok(records)
    }

    /// Number of wallets with stats
    pub fn wallet_count(&self) -> ReclaimResult<u64> {
        let conn = self.db.conn();
        Ok(conn.query_row("SELECT COUNT(*) FROM user_stats", [], |r| r.get(0))?)
    }
}

fn unlocked_achievements(
    conn: &Connection,
    catalog: &AchievementCatalog,
    wallet: &str,
) -> rusqlite::Result<Vec<UnlockedAchievement>> {
    let mut stmt = conn.prepare(
        r#"SELECT achievement_key, unlocked_at FROM achievement_unlocks
           WHERE wallet_address = ?1
           ORDER BY unlocked_at ASC, achievement_key ASC"#,
    )?;
    let rows = stmt.query_map(params![wallet], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut unlocked = Vec::new();
    for row in rows {
        let (key, unlocked_at) = row?;
        // Keys dropped from the configured catalog stay in the table but are not shown
        if let Some(def) = catalog.get(&key) {
            unlocked.push(UnlockedAchievement {
                achievement: def.clone(),
                unlocked_at,
            });
        }
    }
    Ok(unlocked)
}
