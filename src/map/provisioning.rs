//! Map source selection
//!
//! Online at startup the remote web map is activated directly. Offline, the
//! packaged map is loaded and its first map shown; if the package fails to load
//! or holds no maps, a synthesized basemap is shown instead so the view is
//! never left empty.

use crate::app::event::{Event, EventSender};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::map::{BasemapStyle, MapDefinition, MapSource, PackageLoader};
use crate::resource::{Completion, LoadState, LoadableResource};
use crate::view::MapView;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Where each map source comes from
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningSettings {
    pub web_map_url: String,
    pub package_path: PathBuf,
    pub fallback_style: BasemapStyle,
    pub fallback_center: Coordinates,
    pub fallback_zoom: u8,
}

impl ProvisioningSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            web_map_url: config.web_map_url(),
            package_path: config.package_path()?,
            fallback_style: config
                .fallback
                .basemap
                .parse()
                .map_err(crate::error::Error::Config)?,
            fallback_center: config.fallback_center()?,
            fallback_zoom: config.fallback.zoom,
        })
    }

    fn fallback_source(&self) -> MapSource {
        MapSource::FallbackBasemap {
            style: self.fallback_style,
            center: self.fallback_center,
            zoom: self.fallback_zoom,
        }
    }
}

/// Chooses and activates the map source
pub struct MapProvisioningController {
    settings: ProvisioningSettings,
    loader: Arc<dyn PackageLoader>,
    events: EventSender,
    package: LoadableResource<Vec<MapDefinition>>,
    active: Option<MapSource>,
}

impl MapProvisioningController {
    pub fn new(
        settings: ProvisioningSettings,
        loader: Arc<dyn PackageLoader>,
        events: EventSender,
    ) -> Self {
        Self {
            settings,
            loader,
            events,
            package: LoadableResource::new("offline package"),
            active: None,
        }
    }

    /// The source currently shown on the view
    pub fn active_source(&self) -> Option<&MapSource> {
        self.active.as_ref()
    }

    /// Whether the offline package is still loading
    pub fn is_loading(&self) -> bool {
        self.package.is_loading()
    }

    /// Pick a map source for the connectivity known at startup
    pub fn provision(&mut self, online: bool, view: &mut dyn MapView) {
        if online {
            let source = MapSource::RemoteWebMap {
                url: self.settings.web_map_url.clone(),
            };
            self.activate(source, view);
            return;
        }

        let loader = Arc::clone(&self.loader);
        let path = self.settings.package_path.clone();
        let events = self.events.clone();

        info!(path = %path.display(), "Offline at startup, loading map package");
        self.package.load(
            async move { loader.load(&path).await },
            move |completion| {
                let _ = events.send(Event::PackageLoaded(completion));
            },
        );
    }

    /// Apply the outcome of the package load
    pub fn on_package_loaded(
        &mut self,
        completion: Completion<Vec<MapDefinition>>,
        view: &mut dyn MapView,
    ) {
        let source = match self.package.complete(completion) {
            None => return,
            Some(LoadState::Loaded(maps)) => match maps.first() {
                Some(first) => {
                    info!(map = %first.name, available = maps.len(), "Using offline map");
                    MapSource::LocalPackage {
                        path: self.settings.package_path.clone(),
                        map: first.clone(),
                    }
                }
                None => {
                    warn!(
                        path = %self.settings.package_path.display(),
                        "Offline package contains no maps, using fallback basemap"
                    );
                    self.settings.fallback_source()
                }
            },
            Some(LoadState::Failed(e)) => {
                warn!("Offline package failed to load, using fallback basemap: {}", e);
                self.settings.fallback_source()
            }
            Some(state) => {
                warn!(state = state.label(), "Unexpected package state after completion");
                return;
            }
        };

        self.activate(source, view);
    }

    fn activate(&mut self, source: MapSource, view: &mut dyn MapView) {
        info!(source = source.kind(), "Activating map source");
        view.activate_map_source(&source);
        self.active = Some(source);
    }
}
