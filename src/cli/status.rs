//! Status command handler
//!
//! Shows connectivity and where each map source would come from.

use crate::config::Config;
use crate::connectivity::get_probe;
use crate::error::Result;
use crate::geo::get_locator;
use crate::map::{JsonPackageLoader, PackageLoader};
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Contact the locator and read the offline package
    #[arg(long)]
    pub check: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;
    let probe = get_probe(&config.connectivity.mode);
    let online = probe.is_available();

    println!("hikela v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!(
        "Connectivity: {} (probe: {})",
        if online { "ONLINE" } else { "OFFLINE" },
        probe.name()
    );
    println!();

    let package_path = config.package_path()?;
    println!("Map sources:");
    println!("  Web map:  {}", config.web_map_url());
    println!(
        "  Package:  {} [{}]",
        package_path.display(),
        if package_path.exists() { "present" } else { "missing" }
    );
    println!(
        "  Fallback: {} at ({}) zoom {}",
        config.fallback.basemap,
        config.fallback_center()?,
        config.fallback.zoom
    );
    println!();

    let locator = get_locator(&config)?;
    println!("Locator: {}", locator.name());
    if !config.locator.url.is_empty() {
        println!("  URL: {}", config.locator.url);
    }
    println!("  Timeout: {}s", config.locator.timeout_secs);

    if !args.check {
        return Ok(());
    }

    println!();
    println!("Checks:");
    match locator.load().await {
        Ok(info) => {
            println!("  Locator: OK");
            if let Some(description) = info.description {
                println!("    {}", description);
            }
        }
        Err(e) => println!("  Locator: FAIL ({})", e),
    }

    match JsonPackageLoader::new().load(&package_path).await {
        Ok(maps) if maps.is_empty() => println!("  Package: EMPTY (fallback basemap will be used)"),
        Ok(maps) => {
            println!("  Package: OK ({} map(s))", maps.len());
            for map in maps {
                println!("    {}", map.name);
            }
        }
        Err(e) => println!("  Package: FAIL ({})", e),
    }

    Ok(())
}
