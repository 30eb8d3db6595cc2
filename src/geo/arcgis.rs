//! ArcGIS GeocodeServer backend
//!
//! Loading fetches the service description (`?f=json`); searching uses
//! `findAddressCandidates` with a single-line address.
//!
//! API documentation:
//! <https://developers.arcgis.com/rest/geocode/api-reference/geocoding-find-address-candidates.htm>

use crate::constants::api::ARCGIS_WORLD_GEOCODER_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{http_client, GeocodeParameters, GeocodeResult, Locator, LocatorInfo};
use crate::resource::LoadFuture;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// ArcGIS locator backend
#[derive(Debug, Clone)]
pub struct ArcGisLocator {
    client: reqwest::Client,
    url: String,
}

/// Service description returned by `GET {url}?f=json`
#[derive(Debug, Deserialize)]
struct ServiceDescription {
    #[serde(rename = "serviceDescription", default)]
    service_description: Option<String>,
    #[serde(default)]
    capabilities: Option<String>,
}

/// Error body the REST API returns with a 200 status
///
/// Example: `{"error": {"code": 498, "message": "Invalid token."}}`
#[derive(Debug, Deserialize)]
struct ServiceError {
    code: i64,
    message: String,
}

/// `findAddressCandidates` response
#[derive(Debug, Deserialize)]
struct CandidatesResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    address: String,
    location: Point,
    #[serde(default)]
    attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

impl ArcGisLocator {
    /// Create a locator for a GeocodeServer URL (the public World geocoder by default)
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url
                .unwrap_or_else(|| ARCGIS_WORLD_GEOCODER_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// Fail on an embedded `{"error": ...}` body
    fn check_service_error(body: &Value) -> Result<()> {
        if let Some(error) = body.get("error") {
            let error: ServiceError = serde_json::from_value(error.clone())?;
            return Err(Error::Transport(format!(
                "ArcGIS error {}: {}",
                error.code, error.message
            )));
        }
        Ok(())
    }

    fn parse_description(body: Value) -> Result<LocatorInfo> {
        Self::check_service_error(&body)?;
        let description: ServiceDescription = serde_json::from_value(body)?;

        Ok(LocatorInfo {
            description: description.service_description.filter(|d| !d.is_empty()),
            capabilities: description
                .capabilities
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    fn parse_candidates(body: Value, params: &GeocodeParameters) -> Result<Vec<GeocodeResult>> {
        Self::check_service_error(&body)?;
        let response: CandidatesResponse = serde_json::from_value(body)?;

        response
            .candidates
            .into_iter()
            .take(params.max_results)
            .map(|candidate| {
                let location = Coordinates::new(candidate.location.y, candidate.location.x);
                location.validate()?;
                Ok(GeocodeResult {
                    label: candidate.address,
                    location,
                    attributes: params.filter_attributes(candidate.attributes),
                })
            })
            .collect()
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("ArcGIS request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "ArcGIS returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse ArcGIS response: {}", e)))
    }
}

impl Locator for ArcGisLocator {
    fn name(&self) -> &'static str {
        "arcgis"
    }

    fn load(&self) -> LoadFuture<'_, LocatorInfo> {
        Box::pin(async move {
            let body = self
                .get_json(&self.url, &[("f", "json".to_string())])
                .await
                .map_err(|e| Error::load_failed("locator", e))?;
            Self::parse_description(body).map_err(|e| Error::load_failed("locator", e))
        })
    }

    fn geocode<'a>(
        &'a self,
        query: &'a str,
        params: &'a GeocodeParameters,
    ) -> LoadFuture<'a, Vec<GeocodeResult>> {
        Box::pin(async move {
            let url = format!("{}/findAddressCandidates", self.url);
            let body = self
                .get_json(
                    &url,
                    &[
                        ("SingleLine", query.to_string()),
                        ("outFields", params.out_fields()),
                        ("maxLocations", params.max_results.to_string()),
                        ("outSR", "4326".to_string()),
                        ("f", "json".to_string()),
                    ],
                )
                .await?;
            Self::parse_candidates(body, params)
        })
    }
}
