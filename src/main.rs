//! hikela CLI entry point
//!
//! Headless driver for the map and place search core

use hikela::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
