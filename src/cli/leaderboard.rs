//! Leaderboard command

use anyhow::Result;

use super::{short_wallet, GlobalArgs};

pub async fn leaderboard_command(args: &GlobalArgs, limit: usize, json: bool) -> Result<()> {
    let manager = args.open()?;
    let entries = manager.query().leaderboard(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No recoveries recorded yet.");
        return Ok(());
    }

    println!(
        "{:<5} {:<20} {:>14} {:>9} {:>6}",
        "RANK", "WALLET", "SOL", "ACCOUNTS", "LEVEL"
    );
    println!("{}", "-".repeat(58));
    for e in &entries {
        println!(
            "{:<5} {:<20} {:>14.6} {:>9} {:>6}",
            e.rank,
            short_wallet(&e.wallet_address),
            e.total_sol(),
            e.total_accounts_closed,
            e.current_level
        );
    }
    println!("\n{} wallets tracked", manager.query().wallet_count()?);

    Ok(())
}
