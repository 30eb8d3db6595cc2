//! Search result overlay
//!
//! Graphics drawn on top of the basemap for the current search result, and the
//! presenter that produces them.

pub mod presenter;

use crate::constants::symbols;
use crate::coord::Coordinates;
use crate::geo::Attributes;
use serde::{Deserialize, Serialize};

pub use presenter::{ResultPresenter, ViewportCommand};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self(r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    Square,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    Top,
    Middle,
    Bottom,
}

/// Point marker symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSymbol {
    pub style: MarkerStyle,
    pub color: Rgb,
    pub size: f32,
}

impl Default for MarkerSymbol {
    fn default() -> Self {
        Self {
            style: MarkerStyle::Square,
            color: symbols::MARKER_COLOR.into(),
            size: symbols::MARKER_SIZE,
        }
    }
}

/// Text label symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextSymbol {
    pub size: f32,
    pub color: Rgb,
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl Default for TextSymbol {
    fn default() -> Self {
        Self {
            size: symbols::LABEL_SIZE,
            color: symbols::LABEL_COLOR.into(),
            horizontal: HorizontalAlignment::Center,
            vertical: VerticalAlignment::Bottom,
        }
    }
}

/// A drawable item on the overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Graphic {
    Marker {
        location: Coordinates,
        attributes: Attributes,
        symbol: MarkerSymbol,
    },
    Label {
        location: Coordinates,
        text: String,
        symbol: TextSymbol,
    },
}

impl Graphic {
    pub fn location(&self) -> Coordinates {
        match self {
            Self::Marker { location, .. } | Self::Label { location, .. } => *location,
        }
    }
}

/// The graphics currently shown for search results
///
/// Empty, or exactly the marker and label of the latest successful search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsOverlaySnapshot {
    graphics: Vec<Graphic>,
}

impl GraphicsOverlaySnapshot {
    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Graphic> {
        self.graphics
            .iter()
            .filter(|g| matches!(g, Graphic::Marker { .. }))
    }

    pub fn labels(&self) -> impl Iterator<Item = &Graphic> {
        self.graphics
            .iter()
            .filter(|g| matches!(g, Graphic::Label { .. }))
    }

    pub(crate) fn clear(&mut self) {
        self.graphics.clear();
    }

    pub(crate) fn push(&mut self, graphic: Graphic) {
        self.graphics.push(graphic);
    }
}
