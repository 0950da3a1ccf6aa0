//! SOL Reclaim - progression and fee tiers
//!
//! Users close empty token accounts to recover their rent deposits. Every
//! confirmed recovery feeds a small progression model:
//!
//! 1. **Totals**: lifetime SOL recovered, accounts closed and transactions
//!    per wallet.
//! 2. **Achievements**: one-time XP grants when a running total crosses a
//!    configured threshold.
//! 3. **Levels**: derived from XP; each level costs 1.5x the one before.
//! 4. **VIP tiers**: level AND lifetime SOL pick the platform fee for the
//!    next transaction.
//!
//! Referrals link wallets through generated codes. Catalogs come from
//! `~/.sol-reclaim/config.toml`; state lives in a local SQLite database.

pub mod config;
pub mod stats;
