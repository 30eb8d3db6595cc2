//! Turns a geocode result into overlay graphics and a viewport command

use crate::coord::Coordinates;
use crate::geo::GeocodeResult;
use crate::overlay::{Graphic, GraphicsOverlaySnapshot, MarkerSymbol, TextSymbol};
use crate::view::MapView;
use serde::{Deserialize, Serialize};

/// Where the map view should move after a result is shown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportCommand {
    pub center: Coordinates,
}

/// Owns the search result overlay
#[derive(Debug, Default)]
pub struct ResultPresenter {
    snapshot: GraphicsOverlaySnapshot,
    marker: MarkerSymbol,
    label: TextSymbol,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &GraphicsOverlaySnapshot {
        &self.snapshot
    }

    /// Replace whatever is shown with `result` and recenter on it
    pub fn present(&mut self, result: &GeocodeResult, view: &mut dyn MapView) -> ViewportCommand {
        // Clear first: the previous marker must never outlive the new search
        self.snapshot.clear();
        self.snapshot.push(Graphic::Marker {
            location: result.location,
            attributes: result.attributes.clone(),
            symbol: self.marker,
        });
        self.snapshot.push(Graphic::Label {
            location: result.location,
            text: result.label.clone(),
            symbol: self.label,
        });
        view.update_overlay(&self.snapshot);

        let command = ViewportCommand {
            center: result.location,
        };
        view.recenter_viewport(command.center);
        command
    }

    /// Remove every result graphic
    pub fn clear(&mut self, view: &mut dyn MapView) {
        if self.snapshot.is_empty() {
            return;
        }
        self.snapshot.clear();
        view.update_overlay(&self.snapshot);
    }
}
