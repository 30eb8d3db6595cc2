//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "locator.backend")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[map]");
    println!("portal_url = \"{}\"", config.map.portal_url);
    println!("web_map_item = \"{}\"", config.map.web_map_item);
    if config.map.package_path.is_empty() {
        println!("package_path = \"\" # data directory default");
    } else {
        println!("package_path = \"{}\"", config.map.package_path);
    }
    println!();

    println!("[fallback]");
    println!("basemap = \"{}\"", config.fallback.basemap);
    println!("lat = {}", config.fallback.lat);
    println!("lng = {}", config.fallback.lng);
    println!("zoom = {}", config.fallback.zoom);
    println!();

    println!("[locator]");
    println!("backend = \"{}\"", config.locator.backend);
    if config.locator.url.is_empty() {
        println!("url = \"\" # public endpoint");
    } else {
        println!("url = \"{}\"", config.locator.url);
    }
    println!("timeout_secs = {}", config.locator.timeout_secs);
    println!();

    println!("[search]");
    println!("clear_on_no_match = {}", config.search.clear_on_no_match);
    println!();

    println!("[connectivity]");
    println!("mode = \"{}\"", config.connectivity.mode);
    println!();

    println!("[output]");
    println!("format = \"{}\"", config.output.format);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = \"{}\"", name, template);
    }
}
