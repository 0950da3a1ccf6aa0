//! SQLite database connection and schema management
//!
//! Manages the `~/.sol-reclaim/reclaim.db` database with automatic schema migration.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Database wrapper shared by the manager and its queries
#[derive(Clone)]
pub struct ReclaimDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl ReclaimDb {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open reclaim db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Self::from_connection(conn)
    }

    /// In-memory database (tests and dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory db")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Lock the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Reclaim DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: date-tracked streak columns
        if version < 2 {
            if !has_column(&conn, "user_stats", "current_streak") {
                conn.execute_batch(
                    r#"
                    ALTER TABLE user_stats ADD COLUMN current_streak INTEGER NOT NULL DEFAULT 0;
                    ALTER TABLE user_stats ADD COLUMN best_streak INTEGER NOT NULL DEFAULT 0;
                    ALTER TABLE user_stats ADD COLUMN last_active_day TEXT;
                    "#,
                )?;
            }

            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        // Migration 3: SOL amounts stored as integer lamports
        if version < 3 {
            let tx = conn.unchecked_transaction()?;
            for (table, old, new) in [
                ("user_stats", "total_sol_recovered", "total_lamports_recovered"),
                ("recoveries", "sol_recovered", "lamports_recovered"),
            ] {
                if has_column(&tx, table, new) {
                    continue;
                }
                tx.execute_batch(&format!(
                    "ALTER TABLE {table} ADD COLUMN {new} INTEGER NOT NULL DEFAULT 0;"
                ))?;
                if has_column(&tx, table, old) {
                    tx.execute_batch(&format!(
                        r#"
                        UPDATE {table} SET {new} = CAST(ROUND({old} * 1000000000) AS INTEGER);
                        DROP INDEX IF EXISTS idx_user_sol;
                        ALTER TABLE {table} DROP COLUMN {old};
                        "#
                    ))?;
                }
            }
            tx.execute_batch(
                r#"
                CREATE INDEX IF NOT EXISTS idx_user_lamports ON user_stats(total_lamports_recovered);
                INSERT OR REPLACE INTO schema_version VALUES (3);
                "#,
            )?;
            tx.commit()?;
        }

        Ok(())
    }

    /// Delete all wallet data. The achievement catalog mirror is kept.
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            DELETE FROM achievement_unlocks;
            DELETE FROM recoveries;
            DELETE FROM user_stats;
            "#,
        )?;
        Ok(())
    }
}

fn has_column(conn: &Connection, table: &str, column: &str) -> bool {
    conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |r| r.get::<_, i32>(0),
    )
    .map(|c| c > 0)
    .unwrap_or(false)
}

/// SQL schema for the reclaim database
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);

-- One row per wallet
CREATE TABLE IF NOT EXISTS user_stats (
    wallet_address TEXT PRIMARY KEY,
    total_lamports_recovered INTEGER NOT NULL DEFAULT 0,
    total_accounts_closed INTEGER NOT NULL DEFAULT 0,
    total_transactions INTEGER NOT NULL DEFAULT 0,
    current_level INTEGER NOT NULL DEFAULT 1,
    current_xp INTEGER NOT NULL DEFAULT 0,
    referral_code TEXT NOT NULL UNIQUE,
    referred_by TEXT REFERENCES user_stats(referral_code),
    referral_count INTEGER NOT NULL DEFAULT 0,
    current_streak INTEGER NOT NULL DEFAULT 0,
    best_streak INTEGER NOT NULL DEFAULT 0,
    last_active_day TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Achievement catalog mirror (immutable once inserted)
CREATE TABLE IF NOT EXISTS achievements (
    key TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    icon TEXT NOT NULL DEFAULT '',
    requirement_type TEXT NOT NULL,
    requirement_value REAL NOT NULL,
    xp_reward INTEGER NOT NULL
);

-- Append-only unlock records
CREATE TABLE IF NOT EXISTS achievement_unlocks (
    wallet_address TEXT NOT NULL REFERENCES user_stats(wallet_address),
    achievement_key TEXT NOT NULL REFERENCES achievements(key),
    unlocked_at INTEGER NOT NULL,
    PRIMARY KEY (wallet_address, achievement_key)
);

-- Confirmed recoveries, one per transaction signature
CREATE TABLE IF NOT EXISTS recoveries (
    signature TEXT PRIMARY KEY,
    wallet_address TEXT NOT NULL REFERENCES user_stats(wallet_address),
    accounts_closed INTEGER NOT NULL,
    lamports_recovered INTEGER NOT NULL,
    fee_percent REAL NOT NULL,
    xp_gained INTEGER NOT NULL,
    recorded_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_recoveries_wallet ON recoveries(wallet_address, recorded_at);
"#;
