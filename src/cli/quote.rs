//! Quote command: fee for a prospective recovery

use anyhow::Result;

use super::GlobalArgs;

pub async fn quote_command(args: &GlobalArgs, wallet: &str, gross_sol: f64, json: bool) -> Result<()> {
    let manager = args.open()?;
    let quote = manager.progression().quote(wallet, gross_sol)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    println!("Tier:  {} {}", quote.tier.icon, quote.tier.name);
    println!(
        "Gross: {:.9} SOL ({} lamports)",
        quote.quote.gross_sol(),
        quote.quote.gross_lamports
    );
    println!(
        "Fee:   {:.9} SOL ({}%)",
        quote.quote.fee_sol(),
        quote.quote.fee_percent
    );
    println!("Net:   {:.9} SOL", quote.quote.net_sol());

    Ok(())
}
