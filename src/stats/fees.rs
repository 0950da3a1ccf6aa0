//! Platform fee quotes
//!
//! Fees are computed in lamports with basis points so the split between
//! user and platform never drifts from float rounding.

use serde::Serialize;

use crate::stats::error::ReclaimError;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const BPS_DENOMINATOR: u64 = 10_000;

/// How a recovered balance is split between the wallet and the platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeQuote {
    pub fee_percent: f64,
    pub gross_lamports: u64,
    pub fee_lamports: u64,
    pub net_lamports: u64,
}

impl FeeQuote {
    pub fn gross_sol(&self) -> f64 {
        lamports_to_sol(self.gross_lamports)
    }

    pub fn fee_sol(&self) -> f64 {
        lamports_to_sol(self.fee_lamports)
    }

    pub fn net_sol(&self) -> f64 {
        lamports_to_sol(self.net_lamports)
    }
}

/// Reject negative, NaN and infinite SOL amounts
pub fn validate_sol(amount: f64) -> Result<f64, ReclaimError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(ReclaimError::InvalidAmount(amount))
    }
}

pub fn sol_to_lamports(sol: f64) -> Result<u64, ReclaimError> {
    let sol = validate_sol(sol)?;
    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    if lamports > u64::MAX as f64 {
        return Err(ReclaimError::InvalidAmount(sol));
    }
    Ok(lamports as u64)
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Fee percent expressed in basis points (5.0% -> 500)
pub fn percent_to_bps(fee_percent: f64) -> u64 {
    (fee_percent.clamp(0.0, 100.0) * 100.0).round() as u64
}

/// Split `gross_sol` at `fee_percent`. The fee rounds down.
pub fn quote_fee(gross_sol: f64, fee_percent: f64) -> Result<FeeQuote, ReclaimError> {
    let gross_lamports = sol_to_lamports(gross_sol)?;
    let bps = percent_to_bps(fee_percent);
    let fee_lamports = ((gross_lamports as u128 * bps as u128) / BPS_DENOMINATOR as u128) as u64;

    Ok(FeeQuote {
        fee_percent,
        gross_lamports,
        fee_lamports,
        net_lamports: gross_lamports - fee_lamports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_splits_balance() {
        let q = quote_fee(1.0, 5.0).unwrap();
        assert_eq!(q.gross_lamports, 1_000_000_000);
        assert_eq!(q.fee_lamports, 50_000_000);
        assert_eq!(q.net_lamports, 950_000_000);
        assert!((q.net_sol() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_quote_rounds_fee_down() {
        // 2039280 lamports is the rent of one token account
        let q = quote_fee(0.00203928, 4.5).unwrap();
        assert_eq!(q.gross_lamports, 2_039_280);
        assert_eq!(q.fee_lamports, 91_767); // 91767.6
        assert_eq!(q.fee_lamports + q.net_lamports, q.gross_lamports);
    }

    #[test]
    fn test_zero_fee_and_zero_amount() {
        assert_eq!(quote_fee(0.0, 5.0).unwrap().net_lamports, 0);
        assert_eq!(quote_fee(2.0, 0.0).unwrap().fee_lamports, 0);
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        assert!(quote_fee(-0.5, 5.0).is_err());
        assert!(quote_fee(f64::NAN, 5.0).is_err());
        assert!(quote_fee(f64::INFINITY, 5.0).is_err());
    }

    #[test]
    fn test_percent_to_bps() {
        assert_eq!(percent_to_bps(5.0), 500);
        assert_eq!(percent_to_bps(3.5), 350);
        assert_eq!(percent_to_bps(4.5), 450);
    }
}
