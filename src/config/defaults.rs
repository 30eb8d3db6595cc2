//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Basemap style synthesized when no offline map is usable
pub const DEFAULT_FALLBACK_BASEMAP: &str = "streets-vector";

/// Fallback basemap center latitude (downtown Los Angeles)
pub const DEFAULT_FALLBACK_LAT: f64 = 34.05293;

/// Fallback basemap center longitude
pub const DEFAULT_FALLBACK_LNG: f64 = -118.24368;

/// Fallback basemap level of detail
pub const DEFAULT_FALLBACK_ZOOM: u8 = 11;

/// Default locator backend
pub const DEFAULT_LOCATOR_BACKEND: &str = "arcgis";

/// Locator request timeout in seconds
pub const DEFAULT_LOCATOR_TIMEOUT_SECS: u64 = 30;

/// Default connectivity mode (probe the host)
pub const DEFAULT_CONNECTIVITY_MODE: &str = "auto";

/// Default output format for the headless driver
pub const DEFAULT_FORMAT: &str = "text";

/// Default URL provider for "open in maps" links
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "hikela";
