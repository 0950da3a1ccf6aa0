//! Progression tracking for SOL reclaim
//!
//! Tracks per-wallet recovery totals, XP, levels, VIP fee tiers,
//! achievements and referrals in a SQLite database
//! (`~/.sol-reclaim/reclaim.db`).
//!
//! # Architecture
//!
//! ```text
//!   wallet layer (confirmed tx)      CLI / UI
//!              │                        │
//!              ▼                        ▼
//!     ProgressionManager  ReferralManager  ReclaimQuery
//!              └───────────┬────────────┘
//!                          ▼
//!                ~/.sol-reclaim/reclaim.db
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let reclaim = ReclaimManager::new(&config)?;
//!
//! // Apply a confirmed transaction
//! let outcome = reclaim.progression().record_transaction(wallet, &tx)?;
//!
//! // Profile view
//! let profile = reclaim.query().profile(wallet)?;
//! ```

pub mod achievements;
mod db;
mod error;
mod fees;
mod models;
mod queries;
mod referral;
mod users;
mod wallet;

pub use achievements::{Catalogs, ProgressionManager};
pub use db::ReclaimDb;
pub use error::{ReclaimError, ReclaimResult};
pub use fees::{
    lamports_to_sol, percent_to_bps, quote_fee, sol_to_lamports, FeeQuote, BPS_DENOMINATOR,
    LAMPORTS_PER_SOL,
};
pub use models::{
    CompletedTransaction, LeaderboardEntry, LevelUp, PlayerProfile, RecoveryRecord,
    ReferralOutcome, TransactionOutcome, UnlockedAchievement, UserStats, WalletQuote,
};
pub use queries::ReclaimQuery;
pub use referral::{generate_referral_code, normalize_code, ReferralManager, ReferralSettings};
pub use wallet::{classify_wallet, WalletKind};

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;

/// Central manager for progression tracking
///
/// Owns the database handle and the validated catalogs; hands out the
/// write-side managers and the query interface.
/// Thread-safe through internal mutex on the database connection.
#[derive(Clone)]
pub struct ReclaimManager {
    db: ReclaimDb,
    catalogs: Arc<Catalogs>,
    referral: ReferralSettings,
}

impl ReclaimManager {
    /// Open the database named by the config and load its catalogs
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_path(&config.database_path(), config)
    }

    /// Like [`ReclaimManager::new`] but with an explicit database path
    pub fn with_path(path: &Path, config: &Config) -> Result<Self> {
        let db = ReclaimDb::open(path)?;
        Self::from_db(db, config.catalogs()?, config.settings.referral_settings())
    }

    /// In-memory database (tests and dry runs)
    pub fn in_memory(catalogs: Catalogs, referral: ReferralSettings) -> Result<Self> {
        Self::from_db(ReclaimDb::open_in_memory()?, catalogs, referral)
    }

    fn from_db(db: ReclaimDb, catalogs: Catalogs, referral: ReferralSettings) -> Result<Self> {
        let achievements = {
            let conn = db.conn();
            users::seed_catalog(&conn, &catalogs.achievements)?
        };
        let catalogs = Catalogs::new(catalogs.tiers, achievements);
        Ok(Self {
            db,
            catalogs: Arc::new(catalogs),
            referral,
        })
    }

    /// Catalogs in effect (stored achievement definitions win over config)
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Write side: confirmed transactions, XP and unlocks
    pub fn progression(&self) -> ProgressionManager {
        ProgressionManager::new(self.db.clone(), self.catalogs.clone(), self.referral)
    }

    /// Write side: referral codes
    pub fn referrals(&self) -> ReferralManager {
        ReferralManager::new(self.db.clone(), self.referral)
    }

    /// Read side
    pub fn query(&self) -> ReclaimQuery {
        ReclaimQuery::new(self.db.clone(), self.catalogs.clone())
    }

    /// Reset all wallet data (the achievement catalog is kept)
    pub fn reset_all(&self) -> Result<()> {
        self.db.reset_all()
    }
}
