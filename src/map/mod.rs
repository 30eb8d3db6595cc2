//! Map sources
//!
//! What the map view can display, where offline maps come from, and the
//! controller that picks one at startup.

pub mod package;
pub mod provisioning;

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use package::{JsonPackageLoader, PackageLoader};
pub use provisioning::{MapProvisioningController, ProvisioningSettings};

/// A map definition stored inside an offline package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub name: String,

    /// Initial view center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinates>,

    /// Initial level of detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u8>,

    /// Operational layers, in draw order
    #[serde(default)]
    pub layers: Vec<String>,
}

/// Basemap styles that can be synthesized without network or files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BasemapStyle {
    StreetsVector,
    Topographic,
    Imagery,
}

impl Default for BasemapStyle {
    fn default() -> Self {
        Self::StreetsVector
    }
}

impl std::fmt::Display for BasemapStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StreetsVector => write!(f, "streets-vector"),
            Self::Topographic => write!(f, "topographic"),
            Self::Imagery => write!(f, "imagery"),
        }
    }
}

impl std::str::FromStr for BasemapStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "streets-vector" | "streets_vector" | "streets" => Ok(Self::StreetsVector),
            "topographic" | "topo" => Ok(Self::Topographic),
            "imagery" => Ok(Self::Imagery),
            _ => Err(format!("Unknown basemap style: {}", s)),
        }
    }
}

/// The backing definition of what the map view renders
///
/// Exactly one is active on the view at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MapSource {
    /// A web map served by the portal
    RemoteWebMap { url: String },
    /// The first map of the offline package
    LocalPackage { path: PathBuf, map: MapDefinition },
    /// A synthesized basemap needing neither network nor files
    FallbackBasemap {
        style: BasemapStyle,
        center: Coordinates,
        zoom: u8,
    },
}

impl MapSource {
    /// Short name of the source kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemoteWebMap { .. } => "remote_web_map",
            Self::LocalPackage { .. } => "local_package",
            Self::FallbackBasemap { .. } => "fallback_basemap",
        }
    }
}
