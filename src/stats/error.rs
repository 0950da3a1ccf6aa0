//! Errors surfaced by progression and referral operations
//!
//! Every variant is local to one user action; none of them leave partial
//! state behind.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReclaimError {
    #[error("Referral code '{0}' does not exist")]
    InvalidReferralCode(String),

    #[error("You cannot apply your own referral code")]
    SelfReferral,

    #[error("Wallet {0} has already applied a referral code")]
    AlreadyReferred(String),

    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    #[error("Invalid SOL amount: {0}")]
    InvalidAmount(f64),

    #[error("Invalid transaction signature: '{0}'")]
    InvalidSignature(String),

    #[error("Transaction {0} was already recorded")]
    DuplicateTransaction(String),

    #[error("Stats for {0} changed during the update, retry the operation")]
    Conflict(String),

    #[error("Could not allocate a unique referral code after {0} attempts")]
    ReferralCodeExhausted(u32),

    #[error("Storage failure: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl ReclaimError {
    /// Rejections caused by user input rather than the store
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::Persistence(_) | Self::Conflict(_) | Self::ReferralCodeExhausted(_)
        )
    }
}

pub type ReclaimResult<T> = std::result::Result<T, ReclaimError>;
