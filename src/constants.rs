//! Centralized constants for the hikela crate
//!
//! Values shared between the config defaults, the locator backends and the
//! presenter live here.

/// External service endpoints
pub mod api {
    /// Esri World Geocode service
    pub const ARCGIS_WORLD_GEOCODER_URL: &str =
        "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Portal hosting the web map item
    pub const ARCGIS_PORTAL_URL: &str = "https://www.arcgis.com";

    /// Web map item shown when online
    pub const WEB_MAP_ITEM_ID: &str = "5c3b90e2f3de4c8fae0b4c711104bcb1";

    /// User agent sent with every locator request
    pub const USER_AGENT: &str = concat!("hikela/", env!("CARGO_PKG_VERSION"));
}

/// Geocoding request constraints
pub mod geocode {
    /// Attribute selector asking the service for every result attribute
    pub const ALL_ATTRIBUTES: &str = "*";

    /// Only the best ranked candidate is ever displayed
    pub const MAX_RESULTS: usize = 1;
}

/// Offline map settings
pub mod offline {
    /// File name of the packaged offline map inside the data directory
    pub const PACKAGE_FILE_NAME: &str = "HikeLAMobileMapPackageFile.mmpk";
}

/// Symbology for search result graphics
pub mod symbols {
    /// Marker edge length in points
    pub const MARKER_SIZE: f32 = 12.0;

    /// Marker fill (red)
    pub const MARKER_COLOR: (u8, u8, u8) = (255, 0, 0);

    /// Label font size in points
    pub const LABEL_SIZE: f32 = 18.0;

    /// Label color (dark red)
    pub const LABEL_COLOR: (u8, u8, u8) = (192, 32, 32);
}
