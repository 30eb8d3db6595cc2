//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::view::ViewCommand;

/// JSON formatter - outputs each command as a compact JSON object
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "One JSON object per view command"
    }

    fn format(&self, command: &ViewCommand, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string(command)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::map::MapSource;

    #[test]
    fn test_json_format() {
        let formatter = JsonFormatter;
        let config = Config::default();

        let output = formatter
            .format(&ViewCommand::RecenterViewport(Coordinates::new(34.0, -118.0)), &config)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["command"], "recenter_viewport");
        assert_eq!(parsed["value"]["lat"], 34.0);
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_json_map_source() {
        let output = JsonFormatter
            .format(
                &ViewCommand::ActivateMapSource(MapSource::RemoteWebMap {
                    url: "https://example.com/data".to_string(),
                }),
                &Config::default(),
            )
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["value"]["source"], "remote_web_map");
        assert_eq!(parsed["value"]["url"], "https://example.com/data");
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
