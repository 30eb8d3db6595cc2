//! Run command handler
//!
//! Drives the app without a map surface: each stdin line is a search query and
//! every view command is printed to stdout.

use crate::app::App;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::view::ConsoleView;
use clap::Args;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Run command arguments
#[derive(Args)]
pub struct RunArgs {
    /// Treat the device as online at startup
    #[arg(long, conflicts_with = "offline")]
    pub online: bool,

    /// Treat the device as offline at startup
    #[arg(long)]
    pub offline: bool,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Offline package to use instead of the configured one
    #[arg(long, short = 'p')]
    pub package: Option<PathBuf>,

    /// Locator backend ("arcgis" or "nominatim")
    #[arg(long, short = 'l')]
    pub locator: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the run command
pub async fn run(args: RunArgs) -> Result<()> {
    if args.list_formats {
        println!("Available formats:");
        for f in available_formats() {
            println!("  {:10} {}", f.name, f.description);
        }
        return Ok(());
    }

    super::init_logging();

    let mut config = Config::load()?;
    if args.online {
        config.connectivity.mode = "online".to_string();
    } else if args.offline {
        config.connectivity.mode = "offline".to_string();
    }
    if let Some(package) = args.package {
        config.map.package_path = package.display().to_string();
    }
    if let Some(locator) = args.locator {
        config.set("locator.backend", &locator)?;
    }

    let format_name = args.format.unwrap_or_else(|| config.output.format.clone());
    let formatter = get_formatter(&format_name)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format_name)))?;

    let view = ConsoleView::new(formatter, config.clone(), std::io::stdout());
    let mut app = App::from_config(&config, view)?;

    info!("Starting hikela v{}", env!("CARGO_PKG_VERSION"));

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read query: {}", e);
                    break;
                }
            }
        }
    });

    app.run(rx).await;
    Ok(())
}
