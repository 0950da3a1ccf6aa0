//! Referral codes and referral application
//!
//! Applying a code touches two rows (the caller's `referred_by` and the
//! referrer's `referral_count`); both change in one transaction or neither does.

use chrono::Utc;
use rusqlite::{params, TransactionBehavior};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::db::ReclaimDb;
use super::error::{ReclaimError, ReclaimResult};
use super::users;
use super::wallet::classify_wallet;

const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Shape of generated referral codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralSettings {
    pub code_length: usize,
    pub max_code_attempts: u32,
}

impl Default for ReferralSettings {
    fn default() -> Self {
        Self {
            code_length: 8,
            max_code_attempts: 8,
        }
    }
}

/// Generate a random uppercase alphanumeric code.
///
/// Uniqueness is checked by the caller against the store.
pub fn generate_referral_code(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    if getrandom::getrandom(&mut bytes).is_err() {
        // Fallback: best-effort entropy if OS RNG is unavailable.
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let mut mixed = nanos ^ (std::process::id() as u128).rotate_left(17);
        for b in bytes.iter_mut() {
            *b = (mixed & 0xff) as u8;
            mixed = mixed.rotate_right(7).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        }
    }

    bytes
        .iter()
        .map(|&b| CODE_ALPHABET[(b as usize) % CODE_ALPHABET.len()] as char)
        .collect()
}

/// Canonical form of a user-typed code
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Referral operations over the reclaim database
#[derive(Clone)]
pub struct ReferralManager {
    db: ReclaimDb,
    settings: ReferralSettings,
}

impl ReferralManager {
    pub fn new(db: ReclaimDb, settings: ReferralSettings) -> Self {
        Self { db, settings }
    }

    /// The wallet's own referral code (creating its stats if needed)
    pub fn referral_code(&self, wallet: &str) -> ReclaimResult<String> {
        classify_wallet(wallet)?;
        let mut conn = self.db.conn();
        let txn = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let user = users::get_or_create(&txn, wallet, &self.settings, Utc::now().timestamp_millis())?;
        txn.commit()?;
        Ok(user.referral_code)
    }

    /// Link `wallet` to the owner of `code` and credit the referrer
    pub fn apply_referral(&self, wallet: &str, code: &str) -> ReclaimResult<()> {
        classify_wallet(wallet)?;
        let code = normalize_code(code);
        let now = Utc::now().timestamp_millis();

        let mut conn = self.db.conn();
        let txn = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let caller = users::get_or_create(&txn, wallet, &self.settings, now)?;
        let referrer = match users::find_by_code(&txn, &code)? {
            Some(r) => r,
            None => {
                warn!("Rejected referral for {}: unknown code {}", wallet, code);
                return Err(ReclaimError::InvalidReferralCode(code));
            }
        };
        if referrer.wallet_address == caller.wallet_address {
            warn!("Rejected self-referral for {}", wallet);
            return Err(ReclaimError::SelfReferral);
        }
        if caller.referred_by.is_some() {
            warn!("Rejected referral for {}: already referred", wallet);
            return Err(ReclaimError::AlreadyReferred(wallet.to_string()));
        }

        let linked = txn.execute(
            "UPDATE user_stats SET referred_by = ?1, updated_at = ?2 WHERE wallet_address = ?3 AND referred_by IS NULL",
            params![code, now, wallet],
        )?;
        if linked != 1 {
            return Err(ReclaimError::AlreadyReferred(wallet.to_string()));
        }

        let credited = txn.execute(
            "UPDATE user_stats SET referral_count = referral_count + 1, updated_at = ?1 WHERE wallet_address = ?2",
            params![now, referrer.wallet_address],
        )?;
        if credited != 1 {
            return Err(ReclaimError::Conflict(referrer.wallet_address));
        }

        txn.commit()?;
        info!(
            "Referral applied: {} referred by {} ({})",
            wallet, referrer.wallet_address, code
        );
        Ok(())
    }
}
