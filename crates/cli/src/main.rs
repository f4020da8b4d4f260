use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "dealherald")]
#[command(about = "Posts new game deals to a Discord channel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch deals, drop the ones already posted, post the rest.
    Run {
        /// Print messages instead of posting; nothing is marked as posted.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print posted-deal history statistics as JSON.
    Stats,
    /// Reset the posted-deal history.
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { dry_run } => commands::run(dry_run).await,
        Commands::Stats => commands::stats(),
        Commands::Clear => commands::clear(),
    }
}
