//! Wallet address validation
//!
//! Accepts Solana public keys (base58) and NEAR account ids, either named
//! (`alice.near`) or implicit (64 lowercase hex chars).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::error::ReclaimError;

static SOLANA_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("valid regex"));

static NEAR_IMPLICIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{64}$").expect("valid regex"));

static NEAR_NAMED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(([a-z\d]+[-_])*[a-z\d]+\.)+(near|testnet)$").expect("valid regex")
});

/// Chain a wallet address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Solana,
    Near,
}

impl WalletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solana => "solana",
            Self::Near => "near",
        }
    }
}

/// Classify an address, rejecting anything that is neither chain's format
pub fn classify_wallet(address: &str) -> Result<WalletKind, ReclaimError> {
    if NEAR_IMPLICIT.is_match(address) {
        return Ok(WalletKind::Near);
    }
    if address.len() <= 64 && NEAR_NAMED.is_match(address) {
        return Ok(WalletKind::Near);
    }
    if SOLANA_ADDRESS.is_match(address) {
        return Ok(WalletKind::Solana);
    }
    Err(ReclaimError::InvalidWalletAddress(address.to_string()))
}
