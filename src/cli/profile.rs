//! Profile and history commands

use anyhow::Result;

use super::{format_timestamp, progress_bar, GlobalArgs};

pub async fn profile_command(args: &GlobalArgs, wallet: &str, json: bool) -> Result<()> {
    let manager = args.open()?;
    let Some(profile) = manager.query().profile(wallet)? else {
        if json {
            println!("null");
        } else {
            println!("No activity recorded for {}", wallet);
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    let stats = &profile.stats;
    let level = &profile.level;

    println!("Wallet:        {}", stats.wallet_address);
    println!("Chain:         {}", profile.wallet_kind.as_str());
    println!(
        "Level:         {} {} {}/{} XP",
        level.level,
        progress_bar(level.progress(), 20),
        level.xp_into_level,
        level.xp_for_next
    );
    println!("Total XP:      {}", level.total_xp);
    println!(
        "VIP tier:      {} {} ({}% fee)",
        profile.tier.icon, profile.tier.name, profile.fee_percent
    );
    if let Some(next) = &profile.next_tier {
        println!(
            "Next tier:     {} at level {} and {} SOL recovered ({}% fee)",
            next.name, next.min_level, next.min_sol, next.fee_percent
        );
    }
    println!(
        "Recovered:     {:.6} SOL from {} accounts in {} transactions",
        stats.total_sol(), stats.total_accounts_closed, stats.total_transactions
    );
    println!(
        "Streak:        {} day(s), best {}",
        profile.active_streak, stats.streak.best
    );
    println!("Referral code: {}", stats.referral_code);
    println!("Referrals:     {}", stats.referral_count);
    if let Some(code) = &stats.referred_by {
        println!("Referred by:   {}", code);
    }

    println!(
        "\nAchievements ({}/{}):",
        profile.unlocked.len(),
        profile.achievements_total
    );
    for unlock in &profile.unlocked {
        println!(
            "  {} {:<24} {}",
            unlock.achievement.icon,
            unlock.achievement.name,
            format_timestamp(unlock.unlocked_at)
        );
    }

    Ok(())
}

pub async fn history_command(args: &GlobalArgs, wallet: &str, limit: usize, json: bool) -> Result<()> {
    let manager = args.open()?;
    let records = manager.query().history(wallet, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No recoveries recorded.");
        return Ok(());
    }

    println!(
        "{:<18} {:<20} {:>8} {:>14} {:>6} {:>6}",
        "WHEN", "SIGNATURE", "ACCOUNTS", "SOL", "FEE%", "XP"
    );
    println!("{}", "-".repeat(77));

    for r in records {
        println!(
            "{:<18} {:<20} {:>8} {:>14.9} {:>6} {:>6}",
            format_timestamp(r.recorded_at),
            truncate(&r.signature, 20),
            r.accounts_closed,
            r.sol(),
            r.fee_percent,
            r.xp_gained
        );
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    }
}
