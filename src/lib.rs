//! hikela: offline-capable map provisioning and place search
//!
//! The core of a location search map client, without its user interface.
//! At startup it picks a map source (remote web map when online, a packaged
//! map when offline, a synthesized basemap when the package is unusable) and,
//! when online, prepares a geocoding locator. Each typed query becomes a search
//! session; a newer query supersedes a pending one and only the latest result
//! is ever shown.
//!
//! ## Features
//!
//! - Connectivity-driven map source selection with an offline fallback chain
//! - Cancellable loads with stale-completion detection
//! - Sequence-numbered search sessions
//! - ArcGIS and Nominatim locators
//! - Headless driver rendering view commands as text or JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hikela::app::App;
//! use hikela::view::RecordingView;
//! use hikela::Config;
//!
//! # async fn demo() -> hikela::Result<()> {
//! let config = Config::default();
//! let mut app = App::from_config(&config, RecordingView::new())?;
//!
//! app.start();
//! app.on_search_submitted(Some("Los Angeles"));
//! app.settle().await;
//!
//! println!("Showing {} graphics", app.view().overlay().len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod connectivity;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod map;
pub mod overlay;
pub mod resource;
pub mod search;
pub mod view;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use app::App;
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use map::MapSource;
pub use search::{SearchDisposition, SearchState};
