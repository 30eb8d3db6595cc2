//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::MapSource;
use crate::overlay::Graphic;
use crate::view::ViewCommand;

/// Text formatter - outputs a human-readable line per command
pub struct TextFormatter;

impl TextFormatter {
    fn describe_source(source: &MapSource) -> String {
        match source {
            MapSource::RemoteWebMap { url } => format!("web map {}", url),
            MapSource::LocalPackage { path, map } => {
                format!("offline map '{}' from {}", map.name, path.display())
            }
            MapSource::FallbackBasemap { style, center, zoom } => {
                format!("{} basemap at ({}) zoom {}", style, center, zoom)
            }
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, command: &ViewCommand, config: &Config) -> Result<String> {
        let line = match command {
            ViewCommand::ActivateMapSource(source) => {
                format!("map: {}", Self::describe_source(source))
            }
            ViewCommand::UpdateOverlay(snapshot) => {
                let labels: Vec<&str> = snapshot
                    .labels()
                    .filter_map(|g| match g {
                        Graphic::Label { text, .. } => Some(text.as_str()),
                        Graphic::Marker { .. } => None,
                    })
                    .collect();
                if labels.is_empty() {
                    "overlay: cleared".to_string()
                } else {
                    format!(
                        "overlay: {} marker(s), {}",
                        snapshot.markers().count(),
                        labels.join("; ")
                    )
                }
            }
            ViewCommand::RecenterViewport(location) => {
                match config.format_url(None, location.lat, location.lng) {
                    Ok(link) => format!("viewport: ({}) {}", location, link),
                    Err(_) => format!("viewport: ({})", location),
                }
            }
            ViewCommand::NotifyUser(message) => format!("notice: {}", message),
            ViewCommand::SetSearchEnabled(enabled) => {
                format!("search: {}", if *enabled { "enabled" } else { "disabled" })
            }
        };

        Ok(line)
    }
}
