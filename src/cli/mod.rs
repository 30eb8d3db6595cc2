//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod run;
pub mod status;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Offline-capable map and place search
#[derive(Parser)]
#[command(name = "hikela")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the map and search queries read from stdin
    Run(run::RunArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show connectivity and configured map sources
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}

/// Send logs to stderr, keeping stdout for view output
pub(crate) fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
