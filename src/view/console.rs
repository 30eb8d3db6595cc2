//! Console map view
//!
//! Stands in for a real map surface in the headless driver: every command is
//! rendered with a formatter and written to the output stream.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::format::OutputFormatter;
use crate::map::MapSource;
use crate::overlay::GraphicsOverlaySnapshot;
use crate::view::{MapView, ViewCommand};
use std::io::Write;
use tracing::warn;

/// A view writing formatted commands to a stream
pub struct ConsoleView<W: Write> {
    formatter: Box<dyn OutputFormatter>,
    config: Config,
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(formatter: Box<dyn OutputFormatter>, config: Config, out: W) -> Self {
        Self {
            formatter,
            config,
            out,
        }
    }

    /// Consume the view, returning the underlying stream
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, command: ViewCommand) {
        let line = match self.formatter.format(&command, &self.config) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to format view command: {}", e);
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            warn!("Failed to write view command: {}", e);
        }
    }
}

impl<W: Write> MapView for ConsoleView<W> {
    fn activate_map_source(&mut self, source: &MapSource) {
        self.emit(ViewCommand::ActivateMapSource(source.clone()));
    }

    fn update_overlay(&mut self, snapshot: &GraphicsOverlaySnapshot) {
        self.emit(ViewCommand::UpdateOverlay(snapshot.clone()));
    }

    fn recenter_viewport(&mut self, location: Coordinates) {
        self.emit(ViewCommand::RecenterViewport(location));
    }

    fn notify_user(&mut self, message: &str) {
        self.emit(ViewCommand::NotifyUser(message.to_string()));
    }

    fn set_search_enabled(&mut self, enabled: bool) {
        self.emit(ViewCommand::SetSearchEnabled(enabled));
    }
}
