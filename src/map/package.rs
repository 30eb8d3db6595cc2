//! Offline map packages
//!
//! A package is a JSON bundle listing the maps it contains:
//!
//! ```json
//! {
//!   "name": "Hike LA",
//!   "maps": [ { "name": "Trails", "center": { "lat": 34.1, "lng": -118.3 }, "zoom": 12 } ]
//! }
//! ```
//!
//! Only the first map is ever displayed, but the loader returns all of them.

use crate::error::{Error, Result};
use crate::map::MapDefinition;
use crate::resource::LoadFuture;
use serde::Deserialize;
use std::path::Path;

/// Trait for offline package readers
pub trait PackageLoader: Send + Sync {
    /// Read the map definitions stored at `path`
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a, Vec<MapDefinition>>;
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    maps: Vec<MapDefinition>,
}

/// Reads JSON packages from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPackageLoader;

impl JsonPackageLoader {
    pub fn new() -> Self {
        Self
    }

    fn parse(content: &str) -> Result<Vec<MapDefinition>> {
        let manifest: PackageManifest = serde_json::from_str(content)
            .map_err(|e| Error::Package(format!("Invalid package manifest: {}", e)))?;

        for map in &manifest.maps {
            if let Some(center) = map.center {
                center.validate()?;
            }
        }

        tracing::debug!(
            package = manifest.name.as_deref().unwrap_or("unnamed"),
            maps = manifest.maps.len(),
            "Parsed offline package"
        );
        Ok(manifest.maps)
    }
}

impl PackageLoader for JsonPackageLoader {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a, Vec<MapDefinition>> {
        Box::pin(async move {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                Error::load_failed(format!("offline package {}", path.display()), e)
            })?;
            Self::parse(&content)
                .map_err(|e| Error::load_failed(format!("offline package {}", path.display()), e))
        })
    }
}
