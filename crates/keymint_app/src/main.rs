#![forbid(unsafe_code)]

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

use keymint_core::KeymintConfig;
use keymint_core::logging;

#[derive(Parser, Debug)]
#[command(name = "keymint")]
#[command(about = "Allowlisted NFT mint client", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.keymint/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show supply, pause flag, sale phase, price and limit
    Status,
    /// Print the allowlist Merkle roots
    Root,
    /// Print the Merkle proof for an address
    Proof(commands::ProofArgs),
    /// Submit a mint through the connected wallet
    Mint(commands::MintArgs),
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<KeymintConfig> {
    match path {
        Some(path) => KeymintConfig::load_from_path(&path),
        None => KeymintConfig::load(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config)?;
    let _guard = logging::init_logging(&config.log_level)?;

    let result = match cli.command {
        Commands::Status => commands::status(&config).await,
        Commands::Root => commands::root(&config),
        Commands::Proof(args) => commands::proof(&config, &args),
        Commands::Mint(args) => commands::mint(&config, &args).await,
    };

    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "command failed");
    }
    result
}
