//! Shared test utilities for progression integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use sol_reclaim::config::Config;
use sol_reclaim::stats::{CompletedTransaction, ReclaimManager};
use tempfile::TempDir;

pub const ALICE: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";
pub const BOB: &str = "bob.near";
pub const CAROL: &str = "carol.testnet";
pub const DAVE: &str = "DRpbCBMxVnDK7maPM5tGv6MvB3v1sRMC86PZ8okm21hy";

/// A manager backed by a database file in a fresh temp dir
pub struct TestEnv {
    pub dir: TempDir,
    pub config: Config,
    pub manager: ReclaimManager,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(Config::with_defaults())
    }

    pub fn with_config(config: Config) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ReclaimManager::with_path(&dir.path().join("reclaim.db"), &config)
            .expect("Failed to open reclaim db");
        Self {
            dir,
            config,
            manager,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("reclaim.db")
    }

    /// Open a second manager on the same database file
    pub fn reopen(&self, config: &Config) -> ReclaimManager {
        ReclaimManager::with_path(&self.db_path(), config).expect("Failed to reopen reclaim db")
    }
}

pub fn tx(signature: &str, accounts_closed: u64, sol_recovered: f64) -> CompletedTransaction {
    CompletedTransaction {
        signature: signature.to_string(),
        accounts_closed,
        sol_recovered,
    }
}
