//! Row-level access to `user_stats`
//!
//! All helpers take a `&Connection` so callers can run them inside the
//! transaction that owns the surrounding update.

use std::collections::HashSet;

use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

use super::achievements::{AchievementCatalog, RequirementType, StreakInfo};
use super::error::{ReclaimError, ReclaimResult};
use super::models::UserStats;
use super::referral::{generate_referral_code, ReferralSettings};

const USER_COLUMNS: &str = "wallet_address, total_lamports_recovered, total_accounts_closed, \
     total_transactions, current_level, current_xp, referral_code, referred_by, referral_count, \
     current_streak, best_streak, last_active_day, created_at, updated_at";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<UserStats> {
    Ok(UserStats {
        wallet_address: row.get(0)?,
        total_lamports_recovered: row.get(1)?,
        total_accounts_closed: row.get(2)?,
        total_transactions: row.get(3)?,
        current_level: row.get(4)?,
        current_xp: row.get(5)?,
        referral_code: row.get(6)?,
        referred_by: row.get(7)?,
        referral_count: row.get(8)?,
        streak: StreakInfo {
            current: row.get(9)?,
            best: row.get(10)?,
            last_activity_day: row.get(11)?,
        },
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub(crate) fn load_user(conn: &Connection, wallet: &str) -> rusqlite::Result<Option<UserStats>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM user_stats WHERE wallet_address = ?1"),
        params![wallet],
        row_to_user,
    )
    .optional()
}

pub(crate) fn find_by_code(conn: &Connection, code: &str) -> rusqlite::Result<Option<UserStats>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM user_stats WHERE referral_code = ?1"),
        params![code],
        row_to_user,
    )
    .optional()
}

fn code_taken(conn: &Connection, code: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM user_stats WHERE referral_code = ?1)",
        params![code],
        |r| r.get(0),
    )
}

/// Load a wallet's stats, creating the default row on first interaction
pub(crate) fn get_or_create(
    conn: &Connection,
    wallet: &str,
    referral: &ReferralSettings,
    now: i64,
) -> ReclaimResult<UserStats> {
    if let Some(user) = load_user(conn, wallet)? {
        return Ok(user);
    }

    let mut attempts = 0;
    let code = loop {
        if attempts >= referral.max_code_attempts {
            return Err(ReclaimError::ReferralCodeExhausted(attempts));
        }
        attempts += 1;
        let candidate = generate_referral_code(referral.code_length);
        if !code_taken(conn, &candidate)? {
            break candidate;
        }
        debug!("Referral code collision on attempt {}", attempts);
    };

    conn.execute(
        r#"INSERT INTO user_stats (wallet_address, referral_code, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)"#,
        params![wallet, code, now],
    )?;
    debug!("Created stats for {} with referral code {}", wallet, code);

    load_user(conn, wallet)?.ok_or(ReclaimError::Persistence(
        rusqlite::Error::QueryReturnedNoRows,
    ))
}

/// Keys of every achievement the wallet has unlocked
pub(crate) fn unlocked_keys(conn: &Connection, wallet: &str) -> rusqlite::Result<HashSet<String>> {
    let mut stmt =
        conn.prepare("SELECT achievement_key FROM achievement_unlocks WHERE wallet_address = ?1")?;
    let keys = stmt
        .query_map(params![wallet], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<String>>>()?;
    Ok(keys)
}

/// Mirror the achievement catalog into the database and return the
/// catalog evaluation should use.
///
/// Catalog entries are immutable once stored: when the configured definition
/// of an existing key differs, the stored one wins and a warning is logged.
pub(crate) fn seed_catalog(
    conn: &Connection,
    catalog: &AchievementCatalog,
) -> anyhow::Result<AchievementCatalog> {
    let mut effective = Vec::with_capacity(catalog.len());

    for a in catalog.iter() {
        conn.execute(
            r#"INSERT OR IGNORE INTO achievements
               (key, name, description, icon, requirement_type, requirement_value, xp_reward)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
            params![
                a.key,
                a.name,
                a.description,
                a.icon,
                a.requirement_type.as_str(),
                a.requirement_value,
                a.xp_reward,
            ],
        )?;

        let (stored_type, stored_value, stored_xp): (String, f64, u64) = conn.query_row(
            "SELECT requirement_type, requirement_value, xp_reward FROM achievements WHERE key = ?1",
            params![a.key],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )?;
        let requirement_type = RequirementType::from_str(&stored_type).with_context(|| {
            format!("Unknown requirement type '{}' stored for '{}'", stored_type, a.key)
        })?;

        let mut def = a.clone();
        if requirement_type != a.requirement_type
            || stored_value != a.requirement_value
            || stored_xp != a.xp_reward
        {
            warn!(
                "Achievement '{}' differs from its stored definition; keeping the stored one",
                a.key
            );
            def.requirement_type = requirement_type;
            def.requirement_value = stored_value;
            def.xp_reward = stored_xp;
        }
        effective.push(def);
    }

    Ok(AchievementCatalog::new(effective)?)
}
