//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/hikela/config.toml

pub mod defaults;

use crate::constants::{api, offline};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Map sources
    #[serde(default)]
    pub map: MapConfig,

    /// Synthesized basemap used when the offline package is unusable
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Geocoding service
    #[serde(default)]
    pub locator: LocatorConfig,

    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Connectivity detection
    #[serde(default)]
    pub connectivity: ConnectivityConfig,

    /// Output settings for the headless driver
    #[serde(default)]
    pub output: OutputConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Map source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Portal hosting the web map
    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    /// Web map item id shown when online
    #[serde(default = "default_web_map_item")]
    pub web_map_item: String,

    /// Offline package path; empty means the data directory default
    #[serde(default)]
    pub package_path: String,
}

/// Fallback basemap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Basemap style name
    #[serde(default = "default_fallback_basemap")]
    pub basemap: String,

    #[serde(default = "default_fallback_lat")]
    pub lat: f64,

    #[serde(default = "default_fallback_lng")]
    pub lng: f64,

    /// Level of detail
    #[serde(default = "default_fallback_zoom")]
    pub zoom: u8,
}

/// Locator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Backend name ("arcgis" or "nominatim")
    #[serde(default = "default_locator_backend")]
    pub backend: String,

    /// Service URL; empty means the backend's public endpoint
    #[serde(default)]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_locator_timeout")]
    pub timeout_secs: u64,
}

/// Search behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    /// Clear the previous result when a search finds nothing
    #[serde(default)]
    pub clear_on_no_match: bool,
}

/// Connectivity detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    /// "auto" probes the host; "online" and "offline" force an answer
    #[serde(default = "default_connectivity_mode")]
    pub mode: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format for view commands
    #[serde(default = "default_format")]
    pub format: String,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_portal_url() -> String {
    api::ARCGIS_PORTAL_URL.to_string()
}
fn default_web_map_item() -> String {
    api::WEB_MAP_ITEM_ID.to_string()
}
fn default_fallback_basemap() -> String {
    DEFAULT_FALLBACK_BASEMAP.to_string()
}
fn default_fallback_lat() -> f64 {
    DEFAULT_FALLBACK_LAT
}
fn default_fallback_lng() -> f64 {
    DEFAULT_FALLBACK_LNG
}
fn default_fallback_zoom() -> u8 {
    DEFAULT_FALLBACK_ZOOM
}
fn default_locator_backend() -> String {
    DEFAULT_LOCATOR_BACKEND.to_string()
}
fn default_locator_timeout() -> u64 {
    DEFAULT_LOCATOR_TIMEOUT_SECS
}
fn default_connectivity_mode() -> String {
    DEFAULT_CONNECTIVITY_MODE.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},15z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=15/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            fallback: FallbackConfig::default(),
            locator: LocatorConfig::default(),
            search: SearchConfig::default(),
            connectivity: ConnectivityConfig::default(),
            output: OutputConfig::default(),
            url: UrlConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            portal_url: default_portal_url(),
            web_map_item: default_web_map_item(),
            package_path: String::new(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            basemap: default_fallback_basemap(),
            lat: default_fallback_lat(),
            lng: default_fallback_lng(),
            zoom: default_fallback_zoom(),
        }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            backend: default_locator_backend(),
            url: String::new(),
            timeout_secs: default_locator_timeout(),
        }
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            mode: default_connectivity_mode(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["map", "portal_url"] => Some(self.map.portal_url.clone()),
            ["map", "web_map_item"] => Some(self.map.web_map_item.clone()),
            ["map", "package_path"] => Some(self.map.package_path.clone()),

            ["fallback", "basemap"] => Some(self.fallback.basemap.clone()),
            ["fallback", "lat"] => Some(self.fallback.lat.to_string()),
            ["fallback", "lng"] => Some(self.fallback.lng.to_string()),
            ["fallback", "zoom"] => Some(self.fallback.zoom.to_string()),

            ["locator", "backend"] => Some(self.locator.backend.clone()),
            ["locator", "url"] => Some(self.locator.url.clone()),
            ["locator", "timeout_secs"] => Some(self.locator.timeout_secs.to_string()),

            ["search", "clear_on_no_match"] => Some(self.search.clear_on_no_match.to_string()),

            ["connectivity", "mode"] => Some(self.connectivity.mode.clone()),

            ["output", "format"] => Some(self.output.format.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["map", "portal_url"] => {
                self.map.portal_url = value.to_string();
            }
            ["map", "web_map_item"] => {
                self.map.web_map_item = value.to_string();
            }
            ["map", "package_path"] => {
                self.map.package_path = value.to_string();
            }

            ["fallback", "basemap"] => {
                value.parse::<crate::map::BasemapStyle>().map_err(Error::Config)?;
                self.fallback.basemap = value.to_string();
            }
            ["fallback", "lat"] => {
                let lat: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid latitude value: {}", value))
                })?;
                Coordinates::new(lat, self.fallback.lng).validate()?;
                self.fallback.lat = lat;
            }
            ["fallback", "lng"] => {
                let lng: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid longitude value: {}", value))
                })?;
                Coordinates::new(self.fallback.lat, lng).validate()?;
                self.fallback.lng = lng;
            }
            ["fallback", "zoom"] => {
                self.fallback.zoom = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid zoom value: {}", value))
                })?;
            }

            ["locator", "backend"] => {
                if !crate::geo::available_locators().contains(&value) {
                    return Err(Error::Config(format!("Unknown locator backend: {}", value)));
                }
                self.locator.backend = value.to_string();
            }
            ["locator", "url"] => {
                self.locator.url = value.to_string();
            }
            ["locator", "timeout_secs"] => {
                self.locator.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["search", "clear_on_no_match"] => {
                self.search.clear_on_no_match = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }

            ["connectivity", "mode"] => {
                if !matches!(value, "auto" | "online" | "offline") {
                    return Err(Error::Config(format!("Invalid connectivity mode: {}", value)));
                }
                self.connectivity.mode = value.to_string();
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }

            ["url", "default"] => {
                if !self.url.providers.contains_key(value) {
                    return Err(Error::Config(format!("Unknown URL provider: {}", value)));
                }
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "map.portal_url",
            "map.web_map_item",
            "map.package_path",
            "fallback.basemap",
            "fallback.lat",
            "fallback.lng",
            "fallback.zoom",
            "locator.backend",
            "locator.url",
            "locator.timeout_secs",
            "search.clear_on_no_match",
            "connectivity.mode",
            "output.format",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// URL of the web map shown when online
    pub fn web_map_url(&self) -> String {
        format!(
            "{}/sharing/rest/content/items/{}/data",
            self.map.portal_url.trim_end_matches('/'),
            self.map.web_map_item
        )
    }

    /// Resolved path of the offline map package
    pub fn package_path(&self) -> Result<PathBuf> {
        if !self.map.package_path.is_empty() {
            return Ok(PathBuf::from(&self.map.package_path));
        }
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME).join(offline::PACKAGE_FILE_NAME))
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))
    }

    /// Center of the fallback basemap
    pub fn fallback_center(&self) -> Result<Coordinates> {
        let center = Coordinates::new(self.fallback.lat, self.fallback.lng);
        center.validate()?;
        Ok(center)
    }
}
