//! Tier and achievement catalog listings

use anyhow::Result;

use super::GlobalArgs;

pub async fn tiers_command(args: &GlobalArgs, json: bool) -> Result<()> {
    let config = args.load_config()?;
    let catalogs = config.catalogs()?;

    if json {
        println!("{}", serde_json::to_string_pretty(catalogs.tiers.tiers())?);
        return Ok(());
    }

    println!(
        "{:<4} {:<12} {:>9} {:>10} {:>6}",
        "#", "TIER", "MIN LEVEL", "MIN SOL", "FEE%"
    );
    println!("{}", "-".repeat(45));
    for (i, tier) in catalogs.tiers.tiers().iter().enumerate() {
        println!(
            "{:<4} {:<12} {:>9} {:>10} {:>6}",
            i, tier.name, tier.min_level, tier.min_sol, tier.fee_percent
        );
    }

    Ok(())
}

/// List the achievement catalog, marking unlocks when a wallet is given
pub async fn achievements_command(args: &GlobalArgs, wallet: Option<&str>, json: bool) -> Result<()> {
    let manager = args.open()?;
    let catalog = &manager.catalogs().achievements;
    let unlocked = match wallet {
        Some(w) => manager.query().unlocked(w)?,
        None => Vec::new(),
    };

    if json {
        let entries: Vec<_> = catalog
            .iter()
            .map(|a| {
                let unlocked_at = unlocked
                    .iter()
                    .find(|u| u.achievement.key == a.key)
                    .map(|u| u.unlocked_at);
                serde_json::json!({
                    "achievement": a,
                    "unlocked_at": unlocked_at,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "{:<3} {:<22} {:<16} {:>10} {:>6}",
        "", "ACHIEVEMENT", "REQUIREMENT", "TARGET", "XP"
    );
    println!("{}", "-".repeat(61));
    for a in catalog.iter() {
        let mark = if unlocked.iter().any(|u| u.achievement.key == a.key) {
            "[x]"
        } else if wallet.is_some() {
            "[ ]"
        } else {
            ""
        };
        println!(
            "{:<3} {:<22} {:<16} {:>10} {:>6}",
            mark,
            a.name,
            a.requirement_type.label(),
            a.requirement_value,
            a.xp_reward
        );
    }
    println!("\nTotal available: {} XP", catalog.total_xp());

    Ok(())
}
