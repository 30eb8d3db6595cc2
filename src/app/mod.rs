//! Application control loop
//!
//! Owns both controllers and the view. All state transitions happen on the
//! task that drives the [`App`]; background loads report back through the
//! event channel and are applied by [`App::handle`].

pub mod event;


use crate::config::Config;
use crate::connectivity::{get_probe, ConnectivityProbe};
use crate::error::Result;
use crate::geo::{get_locator, Locator};
use crate::map::{
    JsonPackageLoader, MapProvisioningController, MapSource, PackageLoader, ProvisioningSettings,
};
use crate::search::{
    GeocodeSearchController, Notice, SearchDisposition, SearchSettings, SearchState,
};
use crate::view::MapView;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub use event::{Event, EventReceiver, EventSender};

/// The map and search application, minus its user interface
pub struct App<V: MapView> {
    probe: Box<dyn ConnectivityProbe>,
    provisioning: MapProvisioningController,
    search: GeocodeSearchController,
    view: V,
    events: EventReceiver,
    online_at_startup: Option<bool>,
}

impl<V: MapView> App<V> {
    pub fn new(
        config: &Config,
        probe: Box<dyn ConnectivityProbe>,
        locator: Arc<dyn Locator>,
        loader: Arc<dyn PackageLoader>,
        view: V,
    ) -> Result<Self> {
        let (tx, rx) = event::channel();
        let settings = ProvisioningSettings::from_config(config)?;
        let provisioning = MapProvisioningController::new(settings, loader, tx.clone());
        let search =
            GeocodeSearchController::new(locator, SearchSettings::from_config(config), tx);

        Ok(Self {
            probe,
            provisioning,
            search,
            view,
            events: rx,
            online_at_startup: None,
        })
    }

    /// Build an app with the configured probe, locator and package reader
    pub fn from_config(config: &Config, view: V) -> Result<Self> {
        let probe = get_probe(&config.connectivity.mode);
        let locator = get_locator(config)?;
        Self::new(config, probe, locator, Arc::new(JsonPackageLoader::new()), view)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn active_source(&self) -> Option<&MapSource> {
        self.provisioning.active_source()
    }

    pub fn search_state(&self) -> SearchState {
        self.search.state()
    }

    pub fn online_at_startup(&self) -> Option<bool> {
        self.online_at_startup
    }

    /// Whether a package load, locator load or search is outstanding
    pub fn is_busy(&self) -> bool {
        self.provisioning.is_loading() || self.search.is_busy()
    }

    /// Ask the probe for connectivity and start up accordingly
    pub fn start(&mut self) -> bool {
        let online = self.probe.is_available();
        info!(probe = self.probe.name(), online, "Connectivity at startup");
        self.on_connectivity_known_at_startup(online);
        online
    }

    /// Provision the map and, when online, load the locator
    ///
    /// Only the first call has any effect.
    pub fn on_connectivity_known_at_startup(&mut self, online: bool) {
        if self.online_at_startup.is_some() {
            warn!("Startup connectivity already known, ignoring");
            return;
        }
        self.online_at_startup = Some(online);

        self.provisioning.provision(online, &mut self.view);
        if online {
            self.search.initialize();
        } else {
            info!("Offline at startup, geocoding unavailable for this session");
        }
    }

    /// Handle a query typed by the user
    pub fn on_search_submitted(&mut self, query: Option<&str>) -> SearchDisposition {
        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return SearchDisposition::Ignored;
        };

        let Some(online_at_startup) = self.online_at_startup else {
            debug!("Search before startup, ignoring");
            return SearchDisposition::Unavailable;
        };

        if !self.probe.is_available() {
            self.view.notify_user(&Notice::GeocodingUnavailable.to_string());
            return SearchDisposition::Unavailable;
        }
        if !online_at_startup {
            self.view.notify_user(&Notice::RestartRequired.to_string());
            return SearchDisposition::Unavailable;
        }

        self.search.search(query)
    }

    /// Apply a completion from a background task
    pub fn handle(&mut self, event: Event) {
        debug!(event = event.kind(), "Handling event");
        match event {
            Event::PackageLoaded(completion) => {
                self.provisioning.on_package_loaded(completion, &mut self.view)
            }
            Event::LocatorLoaded(completion) => {
                self.search.on_locator_loaded(completion, &mut self.view)
            }
            Event::SearchCompleted {
                sequence,
                completion,
            } => self
                .search
                .on_search_completed(sequence, completion, &mut self.view),
        }
    }

    /// Process events until nothing is pending
    pub async fn settle(&mut self) {
        while self.is_busy() {
            match self.events.recv().await {
                Some(event) => self.handle(event),
                None => break,
            }
        }
        while let Ok(event) = self.events.try_recv() {
            self.handle(event);
        }
    }

    /// Serve queries from `input` until it closes and all work has settled
    pub async fn run(&mut self, mut input: mpsc::Receiver<String>) {
        if self.online_at_startup.is_none() {
            self.start();
        }

        loop {
            tokio::select! {
                line = input.recv() => match line {
                    Some(query) => {
                        self.on_search_submitted(Some(&query));
                    }
                    None => break,
                },
                Some(event) = self.events.recv() => self.handle(event),
            }
        }

        self.settle().await;
    }
}
