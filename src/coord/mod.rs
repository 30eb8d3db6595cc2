//! Geographic coordinates
//!
//! Point locations shared by geocode results, map definitions and viewport
//! commands. Always WGS84 latitude/longitude in degrees.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Parse a latitude/longitude pair delivered as strings
    pub fn parse(lat: &str, lng: &str) -> Result<Self> {
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCoordinates(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCoordinates(format!("Invalid longitude: {}", lng)))?;
        let coords = Self::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(34.05, -118.24).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(90.1, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_parse() {
        let coords = Coordinates::parse("34.0522", " -118.2437").unwrap();
        assert_relative_eq!(coords.lat, 34.0522);
        assert_relative_eq!(coords.lng, -118.2437);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Coordinates::parse("invalid", "0").is_err());
        assert!(Coordinates::parse("0", "invalid").is_err());
        assert!(Coordinates::parse("91", "0").is_err());
    }

    #[test]
    fn test_display() {
        let coords = Coordinates::new(34.05293, -118.24368);
        assert_eq!(coords.to_string(), "34.05293, -118.24368");
    }
}
