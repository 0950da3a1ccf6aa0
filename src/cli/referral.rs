//! Referral commands

use anyhow::{bail, Result};
use sol_reclaim::stats::ReferralOutcome;

use super::GlobalArgs;

/// Print the wallet's own referral code
pub async fn code_command(args: &GlobalArgs, wallet: &str, json: bool) -> Result<()> {
    let manager = args.open()?;
    let code = manager.referrals().referral_code(wallet)?;

    if json {
        let output = serde_json::json!({
            "wallet_address": wallet,
            "referral_code": code,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", code);
    }
    Ok(())
}

/// Apply someone else's referral code to `wallet`
///
/// Rejections (unknown code, self referral, already referred) are reported
/// as `{ success: false, error }` in JSON mode; storage failures are errors.
pub async fn apply_command(args: &GlobalArgs, wallet: &str, code: &str, json: bool) -> Result<()> {
    let manager = args.open()?;
    let result = manager.referrals().apply_referral(wallet, code);

    if let Err(e) = &result {
        if !e.is_rejection() {
            bail!("Referral failed: {}", e);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&ReferralOutcome::from_result(&result))?);
        return Ok(());
    }

    match result {
        Ok(()) => println!("Referral applied."),
        Err(e) => bail!(e),
    }
    Ok(())
}
