//! Geocoding module
//!
//! Defines what a locator service returns and the `Locator` trait the search
//! controller talks to. Each backend is a single file implementing the trait.

pub mod arcgis;
pub mod nominatim;

use crate::config::Config;
use crate::constants::geocode::{ALL_ATTRIBUTES, MAX_RESULTS};
use crate::coord::Coordinates;
use crate::error::Result;
use crate::resource::LoadFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Attribute mapping carried by a geocode result
pub type Attributes = BTreeMap<String, Value>;

/// A geocoded place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Display label (address or description)
    pub label: String,
    /// Where to draw the result
    pub location: Coordinates,
    /// Everything else the service told us about the match
    #[serde(default)]
    pub attributes: Attributes,
}

/// What a loaded locator reports about itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocatorInfo {
    /// Service description, when the service has one
    pub description: Option<String>,
    /// Operations the service advertises
    pub capabilities: Vec<String>,
}

/// Constraints sent with every geocode request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeParameters {
    /// Attribute names to return; `*` selects all
    pub result_attribute_names: Vec<String>,
    /// Maximum number of candidates
    pub max_results: usize,
}

impl GeocodeParameters {
    /// Request every attribute and a single candidate
    pub fn best_match() -> Self {
        Self {
            result_attribute_names: vec![ALL_ATTRIBUTES.to_string()],
            max_results: MAX_RESULTS,
        }
    }

    /// Whether an attribute is selected by these parameters
    pub fn selects(&self, name: &str) -> bool {
        self.result_attribute_names
            .iter()
            .any(|n| n == ALL_ATTRIBUTES || n == name)
    }

    /// Comma-separated attribute list as the services expect it
    pub fn out_fields(&self) -> String {
        self.result_attribute_names.join(",")
    }

    /// Keep only the selected attributes
    pub fn filter_attributes(&self, attributes: Map<String, Value>) -> Attributes {
        attributes
            .into_iter()
            .filter(|(name, _)| self.selects(name))
            .collect()
    }
}

/// Trait for geocoding backends
///
/// Implementations must be thread-safe; requests run on tokio tasks.
pub trait Locator: Send + Sync {
    /// Returns the backend name (e.g., "arcgis", "nominatim")
    fn name(&self) -> &'static str;

    /// Contact the service and confirm it can geocode
    fn load(&self) -> LoadFuture<'_, LocatorInfo>;

    /// Geocode a free-text query
    ///
    /// Returns candidates ranked best first; an empty list means no match.
    fn geocode<'a>(
        &'a self,
        query: &'a str,
        params: &'a GeocodeParameters,
    ) -> LoadFuture<'a, Vec<GeocodeResult>>;
}

/// Names of the available locator backends
pub fn available_locators() -> Vec<&'static str> {
    vec!["arcgis", "nominatim"]
}

/// Build the configured locator
///
/// Unknown backend names fall back to ArcGIS
pub fn get_locator(config: &Config) -> Result<Arc<dyn Locator>> {
    let timeout = Duration::from_secs(config.locator.timeout_secs);
    let url = (!config.locator.url.is_empty()).then(|| config.locator.url.clone());

    let locator: Arc<dyn Locator> = match config.locator.backend.as_str() {
        "nominatim" => Arc::new(nominatim::NominatimLocator::new(url, timeout)?),
        _ => Arc::new(arcgis::ArcGisLocator::new(url, timeout)?),
    };
    Ok(locator)
}

/// Shared HTTP client for locator backends
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(crate::constants::api::USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_best_match_parameters() {
        let params = GeocodeParameters::best_match();
        assert_eq!(params.max_results, 1);
        assert_eq!(params.out_fields(), "*");
        assert!(params.selects("Addr_type"));
    }

    #[test]
    fn test_filter_attributes() {
        let params = GeocodeParameters {
            result_attribute_names: vec!["City".to_string(), "Score".to_string()],
            max_results: 1,
        };
        let Value::Object(raw) = json!({"City": "Los Angeles", "Score": 100, "Region": "CA"}) else {
            unreachable!()
        };

        let filtered = params.filter_attributes(raw);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered["City"], json!("Los Angeles"));
        assert!(!filtered.contains_key("Region"));
    }

    #[test]
    fn test_geocode_result_serialization() {
        let result = GeocodeResult {
            label: "Griffith Observatory".to_string(),
            location: Coordinates::new(34.1184, -118.3004),
            attributes: Attributes::new(),
        };

        let json = serde_json::to_string(&result).unwrap();
        let parsed: GeocodeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_get_locator() {
        let mut config = Config::default();
        assert_eq!(get_locator(&config).unwrap().name(), "arcgis");

        config.locator.backend = "nominatim".to_string();
        assert_eq!(get_locator(&config).unwrap().name(), "nominatim");
    }
}
