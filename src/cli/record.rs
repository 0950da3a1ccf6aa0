//! Record command: apply a confirmed recovery transaction

use anyhow::Result;
use sol_reclaim::stats::CompletedTransaction;

use super::GlobalArgs;

pub async fn record_command(
    args: &GlobalArgs,
    wallet: &str,
    signature: &str,
    accounts_closed: u64,
    sol_recovered: f64,
    json: bool,
) -> Result<()> {
    let manager = args.open()?;
    let tx = CompletedTransaction {
        signature: signature.to_string(),
        accounts_closed,
        sol_recovered,
    };

    let outcome = manager.progression().record_transaction(wallet, &tx)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let stats = &outcome.stats;
    println!("Recorded {} for {}", signature, wallet);
    println!(
        "Totals:  {:.6} SOL, {} accounts, {} transactions",
        stats.total_sol(), stats.total_accounts_closed, stats.total_transactions
    );
    println!(
        "XP:      {} (+{})  Level {}",
        stats.current_xp, outcome.xp_gained, stats.current_level
    );

    for unlock in &outcome.new_unlocks {
        println!(
            "Unlocked: {} {} (+{} XP)",
            unlock.achievement.icon, unlock.achievement.name, unlock.achievement.xp_reward
        );
    }
    if let Some(up) = &outcome.level_up {
        println!("Level up! {} -> {}", up.old_level, up.new_level);
    }
    if outcome.tier_changed {
        println!(
            "New VIP tier: {} {} ({}% fee)",
            outcome.tier.icon, outcome.tier.name, outcome.tier.fee_percent
        );
    }

    Ok(())
}
