//! Init command implementation

use anyhow::{bail, Result};
use sol_reclaim::config::Config;

use super::GlobalArgs;

pub async fn init_command(args: &GlobalArgs, force: bool) -> Result<()> {
    let config_path = args.config_path();

    if !Config::init_at(&config_path, force)? {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }
    println!("Created: {}", config_path.display());

    // Create the database and mirror the achievement catalog
    let manager = args.open()?;
    let catalogs = manager.catalogs();
    println!(
        "Database ready: {} tiers, {} achievements",
        catalogs.tiers.len(),
        catalogs.achievements.len()
    );

    Ok(())
}
