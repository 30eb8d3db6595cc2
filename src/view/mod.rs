//! Map view interface
//!
//! The core never draws anything itself. Every change it wants on screen goes
//! through [`MapView`], implemented by whatever owns the map surface.

pub mod console;

use crate::coord::Coordinates;
use crate::map::MapSource;
use crate::overlay::GraphicsOverlaySnapshot;
use serde::Serialize;

pub use console::ConsoleView;

/// Commands the core issues to the map surface
///
/// Called only from the control thread.
pub trait MapView {
    /// Replace the displayed map with `source`
    fn activate_map_source(&mut self, source: &MapSource);

    /// Replace the search result graphics with `snapshot`
    fn update_overlay(&mut self, snapshot: &GraphicsOverlaySnapshot);

    /// Center the viewport on `location`
    fn recenter_viewport(&mut self, location: Coordinates);

    /// Show a transient message to the user
    fn notify_user(&mut self, message: &str);

    /// Enable or disable the search input
    fn set_search_enabled(&mut self, enabled: bool);
}

/// A single issued view command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum ViewCommand {
    ActivateMapSource(MapSource),
    UpdateOverlay(GraphicsOverlaySnapshot),
    RecenterViewport(Coordinates),
    NotifyUser(String),
    SetSearchEnabled(bool),
}

/// A view that remembers every command and the resulting screen state
#[derive(Debug, Clone)]
pub struct RecordingView {
    commands: Vec<ViewCommand>,
    map_source: Option<MapSource>,
    overlay: GraphicsOverlaySnapshot,
    viewport: Option<Coordinates>,
    search_enabled: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            map_source: None,
            overlay: GraphicsOverlaySnapshot::default(),
            viewport: None,
            search_enabled: true,
        }
    }

    /// Every command, in the order it was issued
    pub fn commands(&self) -> &[ViewCommand] {
        &self.commands
    }

    pub fn map_source(&self) -> Option<&MapSource> {
        self.map_source.as_ref()
    }

    pub fn overlay(&self) -> &GraphicsOverlaySnapshot {
        &self.overlay
    }

    pub fn viewport(&self) -> Option<Coordinates> {
        self.viewport
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    /// Messages shown to the user so far
    pub fn notices(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                ViewCommand::NotifyUser(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// How many times a map source was activated
    pub fn activations(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, ViewCommand::ActivateMapSource(_)))
            .count()
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView for RecordingView {
    fn activate_map_source(&mut self, source: &MapSource) {
        self.map_source = Some(source.clone());
        self.commands.push(ViewCommand::ActivateMapSource(source.clone()));
    }

    fn update_overlay(&mut self, snapshot: &GraphicsOverlaySnapshot) {
        self.overlay = snapshot.clone();
        self.commands.push(ViewCommand::UpdateOverlay(snapshot.clone()));
    }

    fn recenter_viewport(&mut self, location: Coordinates) {
        self.viewport = Some(location);
        self.commands.push(ViewCommand::RecenterViewport(location));
    }

    fn notify_user(&mut self, message: &str) {
        self.commands.push(ViewCommand::NotifyUser(message.to_string()));
    }

    fn set_search_enabled(&mut self, enabled: bool) {
        self.search_enabled = enabled;
        self.commands.push(ViewCommand::SetSearchEnabled(enabled));
    }
}
