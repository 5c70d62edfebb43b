use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rota_state::RosterStore;

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "rota",
    about = "rota — automatic volunteer roster assignment",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to the roster database (overrides rota.toml).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Path to the config file.
    #[arg(long, default_value = "rota.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an organization dataset from a JSON file.
    Import {
        /// Path to the dataset JSON.
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Run the automatic assignment engine for a period.
    ///
    /// Fills every unmet role slot in the period's occurrences, respecting
    /// eligibility and availability, preferring under-assigned volunteers.
    /// Re-running over the same period only targets still-unmet headcount.
    Assign {
        /// Organization identifier.
        #[arg(long)]
        org: Option<String>,
        /// Period to fill, as YYYY-MM.
        #[arg(long)]
        period: String,
        /// Seed for the tie-break RNG (omit for entropy).
        #[arg(long)]
        seed: Option<u64>,
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List a period's assignments, date ascending.
    Roster {
        /// Organization identifier.
        #[arg(long)]
        org: Option<String>,
        /// Period to list, as YYYY-MM.
        #[arg(long)]
        period: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rota=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = config::RotaConfig::load_or_default(&cli.config)?;

    let db_path = cli
        .db
        .or_else(|| config.store.as_ref().and_then(|s| s.path.clone()))
        .unwrap_or_else(|| PathBuf::from("rota.redb"));
    let store = RosterStore::open(&db_path)?;

    match cli.command {
        Commands::Import { file } => commands::import::import(&store, &file),
        Commands::Assign {
            org,
            period,
            seed,
            json,
        } => {
            let org = resolve_org(org, &config)?;
            commands::assign::assign(&store, &org, &period, seed, json)
        }
        Commands::Roster { org, period } => {
            let org = resolve_org(org, &config)?;
            commands::roster::roster(&store, &org, &period)
        }
    }
}

fn resolve_org(flag: Option<String>, config: &config::RotaConfig) -> anyhow::Result<String> {
    flag.or_else(|| {
        config
            .defaults
            .as_ref()
            .and_then(|d| d.organization.clone())
    })
    .ok_or_else(|| {
        anyhow::anyhow!("no organization given; pass --org or set [defaults].organization in rota.toml")
    })
}
