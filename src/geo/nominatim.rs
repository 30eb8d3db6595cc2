//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::constants::api::NOMINATIM_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{http_client, GeocodeParameters, GeocodeResult, Locator, LocatorInfo};
use crate::resource::LoadFuture;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimLocator {
    client: reqwest::Client,
    url: String,
}

/// Nominatim search response item
///
/// Everything besides the coordinates and name becomes a result attribute.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// `/status?format=json` response
#[derive(Debug, Deserialize)]
struct NominatimStatus {
    status: i64,
    message: String,
}

impl NominatimLocator {
    /// Create a Nominatim backend (the public OSM instance by default)
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url
                .unwrap_or_else(|| NOMINATIM_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn parse_status(status: NominatimStatus) -> Result<LocatorInfo> {
        if status.status != 0 {
            return Err(Error::load_failed(
                "locator",
                format!("Nominatim status {}: {}", status.status, status.message),
            ));
        }

        Ok(LocatorInfo {
            description: Some(format!("Nominatim ({})", status.message)),
            capabilities: vec!["search".to_string(), "reverse".to_string()],
        })
    }

    fn parse_results(
        results: Vec<NominatimResult>,
        params: &GeocodeParameters,
    ) -> Result<Vec<GeocodeResult>> {
        results
            .into_iter()
            .take(params.max_results)
            .map(|result| {
                Ok(GeocodeResult {
                    location: Coordinates::parse(&result.lat, &result.lon)?,
                    label: result.display_name,
                    attributes: params.filter_attributes(result.extra),
                })
            })
            .collect()
    }
}

impl Locator for NominatimLocator {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    fn load(&self) -> LoadFuture<'_, LocatorInfo> {
        Box::pin(async move {
            let url = format!("{}/status?format=json", self.url);

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| {
                    Error::load_failed("locator", format!("Nominatim request failed: {}", e))
                })?;

            if !response.status().is_success() {
                return Err(Error::load_failed(
                    "locator",
                    format!("Nominatim returned status: {}", response.status()),
                ));
            }

            let status: NominatimStatus = response
                .json()
                .await
                .map_err(|e| {
                    let reason = format!("Failed to parse Nominatim status: {}", e);
                    Error::load_failed("locator", reason)
                })?;

            Self::parse_status(status)
        })
    }

    fn geocode<'a>(
        &'a self,
        query: &'a str,
        params: &'a GeocodeParameters,
    ) -> LoadFuture<'a, Vec<GeocodeResult>> {
        Box::pin(async move {
            let url = format!(
                "{}/search?q={}&format=json&limit={}",
                self.url,
                urlencoding::encode(query),
                params.max_results
            );

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| Error::Transport(format!("Nominatim request failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(Error::Transport(format!(
                    "Nominatim returned status: {}",
                    response.status()
                )));
            }

            let results: Vec<NominatimResult> = response
                .json()
                .await
                .map_err(|e| {
                    Error::Transport(format!("Failed to parse Nominatim response: {}", e))
                })?;

            Self::parse_results(results, params)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<NominatimResult> {
        serde_json::from_value(json!([
            {
                "place_id": 298076,
                "lat": "34.0536909",
                "lon": "-118.242766",
                "display_name": "Los Angeles, Los Angeles County, California, United States",
                "class": "boundary",
                "type": "administrative",
                "importance": 0.85
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_parse_results() {
        let params = GeocodeParameters::best_match();
        let results = NominatimLocator::parse_results(sample(), &params).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].label.starts_with("Los Angeles"));
        assert!((results[0].location.lat - 34.0536909).abs() < 1e-6);
        assert_eq!(results[0].attributes["type"], json!("administrative"));
        assert!(!results[0].attributes.contains_key("lat"));
    }

    #[test]
    fn test_parse_results_invalid_coords() {
        let results: Vec<NominatimResult> = serde_json::from_value(json!([
            {"lat": "north", "lon": "0", "display_name": "Nowhere"}
        ]))
        .unwrap();
        let params = GeocodeParameters::best_match();
        assert!(NominatimLocator::parse_results(results, &params).is_err());
    }

    #[test]
    fn test_parse_status() {
        let ok = NominatimStatus { status: 0, message: "OK".to_string() };
        assert!(NominatimLocator::parse_status(ok).is_ok());

        let down = NominatimStatus { status: 700, message: "No database".to_string() };
        let err = NominatimLocator::parse_status(down).unwrap_err();
        assert!(matches!(err, Error::ResourceLoad { .. }));
    }

    #[test]
    fn test_backend_creation() {
        let backend = NominatimLocator::new(None, Duration::from_secs(5)).unwrap();
        assert!(format!("{:?}", backend).contains("NominatimLocator"));
        assert_eq!(backend.name(), "nominatim");
    }
}
