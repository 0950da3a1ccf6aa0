use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::GlobalArgs;

#[derive(Parser)]
#[command(name = "sol-reclaim")]
#[command(about = "SOL Reclaim progression - XP, levels, VIP fee tiers, achievements and referrals")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.sol-reclaim/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database (overrides settings.database_path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default ~/.sol-reclaim/config.toml and create the database
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Apply a confirmed recovery transaction to a wallet
    Record {
        #[arg(long)]
        wallet: String,
        /// Transaction signature (each signature is recorded once)
        #[arg(long)]
        signature: String,
        /// Number of accounts closed
        #[arg(long)]
        accounts: u64,
        /// SOL recovered (before fees)
        #[arg(long)]
        sol: f64,
        #[arg(long)]
        json: bool,
    },

    /// Referral codes
    Referral {
        #[command(subcommand)]
        command: ReferralCommands,
    },

    /// Show a wallet's level, tier, streak and achievements
    Profile {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        json: bool,
    },

    /// Quote the platform fee for a prospective recovery
    Quote {
        #[arg(long)]
        wallet: String,
        /// Gross SOL to be recovered
        #[arg(long)]
        sol: f64,
        #[arg(long)]
        json: bool,
    },

    /// List the VIP tier catalog
    Tiers {
        #[arg(long)]
        json: bool,
    },

    /// List the achievement catalog
    Achievements {
        /// Mark achievements unlocked by this wallet
        #[arg(long)]
        wallet: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Top wallets by SOL recovered
    Leaderboard {
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },

    /// Recent recoveries for a wallet
    History {
        #[arg(long)]
        wallet: String,
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ReferralCommands {
    /// Print the wallet's referral code
    Code {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        json: bool,
    },

    /// Apply a referral code to the wallet
    Apply {
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let args = GlobalArgs {
        config: cli.config,
        db: cli.db,
    };

    match cli.command {
        Commands::Init { force } => {
            cli::init::init_command(&args, force).await?;
        }
        Commands::Record {
            wallet,
            signature,
            accounts,
            sol,
            json,
        } => {
            cli::record::record_command(&args, &wallet, &signature, accounts, sol, json).await?;
        }
        Commands::Referral { command } => match command {
            ReferralCommands::Code { wallet, json } => {
                cli::referral::code_command(&args, &wallet, json).await?;
            }
            ReferralCommands::Apply { wallet, code, json } => {
                cli::referral::apply_command(&args, &wallet, &code, json).await?;
            }
        },
        Commands::Profile { wallet, json } => {
            cli::profile::profile_command(&args, &wallet, json).await?;
        }
        Commands::Quote { wallet, sol, json } => {
            cli::quote::quote_command(&args, &wallet, sol, json).await?;
        }
        Commands::Tiers { json } => {
            cli::catalog::tiers_command(&args, json).await?;
        }
        Commands::Achievements { wallet, json } => {
            cli::catalog::achievements_command(&args, wallet.as_deref(), json).await?;
        }
        Commands::Leaderboard { limit, json } => {
            cli::leaderboard::leaderboard_command(&args, limit, json).await?;
        }
        Commands::History {
            wallet,
            limit,
            json,
        } => {
            cli::profile::history_command(&args, &wallet, limit, json).await?;
        }
    }

    Ok(())
}
