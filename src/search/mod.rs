//! Geocode search
//!
//! The controller loads the locator once, then runs at most one search at a
//! time. A new query supersedes the pending one: its request is cancelled and,
//! because cancellation is only advisory, every completion is checked against
//! the current session's sequence number before it may touch the overlay.

pub mod session;

use crate::app::event::{Event, EventSender};
use crate::config::Config;
use crate::geo::{GeocodeParameters, GeocodeResult, Locator, LocatorInfo};
use crate::overlay::{GraphicsOverlaySnapshot, ResultPresenter};
use crate::resource::{Completion, LoadState, LoadableResource};
use crate::view::MapView;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use session::SearchSession;

/// Search controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Never initialized (offline at startup)
    Uninitialized,
    /// Waiting for the locator service
    LocatorLoading,
    /// Locator loaded, no search issued yet
    Ready,
    /// A search is pending
    SearchInFlight,
    /// The last search finished
    SearchIdle,
    /// The locator failed to load; terminal
    Disabled,
}

impl SearchState {
    /// Whether a query can be sent right away
    pub fn accepts_queries(&self) -> bool {
        matches!(self, Self::Ready | Self::SearchInFlight | Self::SearchIdle)
    }
}

/// What happened to a submitted query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDisposition {
    /// Empty query; nothing happened
    Ignored,
    /// Search is not available in this state; nothing happened
    Unavailable,
    /// Held until the locator finishes loading
    Deferred,
    /// Request issued with this sequence number
    Started(u64),
}

/// Messages shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoMatch { query: String },
    SearchFailed { query: String, reason: String },
    GeocodingUnavailable,
    RestartRequired,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch { query } => write!(f, "No match found for {}", query),
            Self::SearchFailed { query, reason } => {
                write!(f, "Search for {} failed: {}", query, reason)
            }
            Self::GeocodingUnavailable => write!(f, "Geocoding is not available."),
            Self::RestartRequired => {
                write!(f, "Please restart the app to use geocoding feature.")
            }
        }
    }
}

/// Tunable search behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSettings {
    /// Clear the previous result when a search finds nothing
    pub clear_on_no_match: bool,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            clear_on_no_match: config.search.clear_on_no_match,
        }
    }
}

/// Serves one geocode search at a time
pub struct GeocodeSearchController {
    locator: Arc<dyn Locator>,
    settings: SearchSettings,
    events: EventSender,
    state: SearchState,
    locator_resource: LoadableResource<LocatorInfo>,
    params: Option<Arc<GeocodeParameters>>,
    presenter: Option<ResultPresenter>,
    current: Option<SearchSession>,
    pending_query: Option<String>,
    last_sequence: u64,
}

impl GeocodeSearchController {
    pub fn new(locator: Arc<dyn Locator>, settings: SearchSettings, events: EventSender) -> Self {
        Self {
            locator,
            settings,
            events,
            state: SearchState::Uninitialized,
            locator_resource: LoadableResource::new("locator"),
            params: None,
            presenter: None,
            current: None,
            pending_query: None,
            last_sequence: 0,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Whether a load or search is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(self.state, SearchState::LocatorLoading | SearchState::SearchInFlight)
    }

    /// The session whose result will be shown, if one is pending
    pub fn current_session(&self) -> Option<&SearchSession> {
        self.current.as_ref()
    }

    /// Sequence number of the most recently started search
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Request constraints, once the locator is loaded
    pub fn parameters(&self) -> Option<&GeocodeParameters> {
        self.params.as_deref()
    }

    /// The search result overlay, once the locator is loaded
    pub fn overlay(&self) -> Option<&GraphicsOverlaySnapshot> {
        self.presenter.as_ref().map(ResultPresenter::snapshot)
    }

    /// Start loading the locator service
    pub fn initialize(&mut self) {
        if self.state != SearchState::Uninitialized {
            debug!(state = ?self.state, "Locator already initialized");
            return;
        }

        let locator = Arc::clone(&self.locator);
        let events = self.events.clone();
        info!(locator = self.locator.name(), "Loading locator");

        self.locator_resource.load(
            async move { locator.load().await },
            move |completion| {
                let _ = events.send(Event::LocatorLoaded(completion));
            },
        );
        self.state = SearchState::LocatorLoading;
    }

    /// Apply the outcome of the locator load
    pub fn on_locator_loaded(
        &mut self,
        completion: Completion<LocatorInfo>,
        view: &mut dyn MapView,
    ) {
        match self.locator_resource.complete(completion) {
            Some(LoadState::Loaded(info)) => {
                info!(
                    locator = self.locator.name(),
                    capabilities = ?info.capabilities,
                    "Locator ready"
                );
                self.params = Some(Arc::new(GeocodeParameters::best_match()));
                self.presenter = Some(ResultPresenter::new());
                self.state = SearchState::Ready;
            }
            Some(LoadState::Failed(e)) => {
                warn!("Locator failed to load, disabling search: {}", e);
                view.set_search_enabled(false);
                self.pending_query = None;
                self.state = SearchState::Disabled;
            }
            _ => return,
        }

        if let Some(query) = self.pending_query.take() {
            debug!(query = %query, "Issuing query held during locator load");
            self.search(&query);
        }
    }

    /// Search for `query`, superseding any pending search
    pub fn search(&mut self, query: &str) -> SearchDisposition {
        let query = query.trim();
        if query.is_empty() {
            return SearchDisposition::Ignored;
        }

        match self.state {
            SearchState::Uninitialized | SearchState::Disabled => {
                debug!(state = ?self.state, "Search unavailable");
                return SearchDisposition::Unavailable;
            }
            SearchState::LocatorLoading => {
                self.pending_query = Some(query.to_string());
                return SearchDisposition::Deferred;
            }
            SearchState::Ready | SearchState::SearchInFlight | SearchState::SearchIdle => {}
        }

        let Some(params) = self.params.clone() else {
            return SearchDisposition::Unavailable;
        };

        if let Some(mut previous) = self.current.take() {
            previous.outcome.cancel();
            info!(
                sequence = previous.sequence(),
                query = %previous.query(),
                started_at = %previous.started_at(),
                "Superseding pending search"
            );
        }

        self.last_sequence += 1;
        let sequence = self.last_sequence;
        let mut session = SearchSession::new(query, sequence);

        let locator = Arc::clone(&self.locator);
        let events = self.events.clone();
        let text = query.to_string();
        session.outcome.load(
            async move { locator.geocode(&text, &params).await },
            move |completion| {
                let _ = events.send(Event::SearchCompleted {
                    sequence,
                    completion,
                });
            },
        );

        info!(sequence, query = %query, "Searching");
        self.current = Some(session);
        self.state = SearchState::SearchInFlight;
        SearchDisposition::Started(sequence)
    }

    /// Apply the outcome of a search
    pub fn on_search_completed(
        &mut self,
        sequence: u64,
        completion: Completion<Vec<GeocodeResult>>,
        view: &mut dyn MapView,
    ) {
        let is_current = self
            .current
            .as_ref()
            .is_some_and(|session| session.sequence() == sequence);
        if !is_current {
            debug!(sequence, current = self.last_sequence, "Discarding superseded search result");
            return;
        }

        let Some(mut session) = self.current.take() else {
            return;
        };
        if session.outcome.complete(completion).is_none() {
            self.current = Some(session);
            return;
        }

        match session.outcome.take_state() {
            LoadState::Loaded(results) => match results.into_iter().next() {
                Some(best) => {
                    info!(
                        sequence,
                        label = %best.label,
                        elapsed_ms = session.elapsed_ms(),
                        "Showing search result"
                    );
                    if let Some(presenter) = self.presenter.as_mut() {
                        presenter.present(&best, view);
                    }
                }
                None => {
                    info!(sequence, query = %session.query(), "No match");
                    let notice = Notice::NoMatch {
                        query: session.query().to_string(),
                    };
                    view.notify_user(&notice.to_string());
                    if self.settings.clear_on_no_match {
                        if let Some(presenter) = self.presenter.as_mut() {
                            presenter.clear(view);
                        }
                    }
                }
            },
            LoadState::Failed(e) => {
                warn!(sequence, query = %session.query(), "Search failed: {}", e);
                let notice = Notice::SearchFailed {
                    query: session.query().to_string(),
                    reason: e.to_string(),
                };
                view.notify_user(&notice.to_string());
            }
            LoadState::NotLoaded | LoadState::Loading => {}
        }

        self.state = SearchState::SearchIdle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::event::{self, EventReceiver};
    use crate::overlay::Graphic;
    use crate::testing::{place, ScriptedLocator};
    use crate::view::{RecordingView, ViewCommand};

    struct Harness {
        controller: GeocodeSearchController,
        view: RecordingView,
        locator: Arc<ScriptedLocator>,
        rx: EventReceiver,
    }

    impl Harness {
        fn new(locator: ScriptedLocator) -> Self {
            Self::with_settings(locator, SearchSettings::default())
        }

        fn with_settings(locator: ScriptedLocator, settings: SearchSettings) -> Self {
            let (tx, rx) = event::channel();
            let locator = Arc::new(locator);
            let controller = GeocodeSearchController::new(locator.clone(), settings, tx);
            Self {
                controller,
                view: RecordingView::new(),
                locator,
                rx,
            }
        }

        async fn ready(locator: ScriptedLocator) -> Self {
            let mut harness = Self::new(locator);
            harness.controller.initialize();
            harness.settle().await;
            assert_eq!(harness.controller.state(), SearchState::Ready);
            harness
        }

        fn dispatch(&mut self, event: Event) {
            match event {
                Event::LocatorLoaded(completion) => {
                    self.controller.on_locator_loaded(completion, &mut self.view)
                }
                Event::SearchCompleted {
                    sequence,
                    completion,
                } => self
                    .controller
                    .on_search_completed(sequence, completion, &mut self.view),
                other => panic!("unexpected event: {}", other.kind()),
            }
        }

        async fn settle(&mut self) {
            while self.controller.is_busy() {
                match self.rx.recv().await {
                    Some(event) => self.dispatch(event),
                    None => break,
                }
            }
            while let Ok(event) = self.rx.try_recv() {
                self.dispatch(event);
            }
        }

        fn labels(&self) -> Vec<String> {
            self.view
                .overlay()
                .labels()
                .filter_map(|g| match g {
                    Graphic::Label { text, .. } => Some(text.clone()),
                    Graphic::Marker { .. } => None,
                })
                .collect()
        }
    }

    #[tokio::test]
    async fn test_initialize_loads_locator_once() {
        let mut harness = Harness::new(ScriptedLocator::new());
        assert_eq!(harness.controller.state(), SearchState::Uninitialized);
        assert!(harness.controller.overlay().is_none());

        harness.controller.initialize();
        assert_eq!(harness.controller.state(), SearchState::LocatorLoading);
        harness.controller.initialize();
        harness.settle().await;

        assert_eq!(harness.controller.state(), SearchState::Ready);
        assert_eq!(harness.locator.load_calls(), 1);
        assert_eq!(
            harness.controller.parameters(),
            Some(&GeocodeParameters::best_match())
        );
        assert!(harness.controller.overlay().is_some_and(|o| o.is_empty()));
    }

    #[tokio::test]
    async fn test_locator_failure_disables_search() {
        let mut harness = Harness::new(ScriptedLocator::new().failing_load());
        harness.controller.initialize();
        harness.settle().await;

        assert_eq!(harness.controller.state(), SearchState::Disabled);
        assert!(!harness.view.search_enabled());

        assert_eq!(harness.controller.search("Los Angeles"), SearchDisposition::Unavailable);
        harness.settle().await;
        assert_eq!(harness.locator.geocode_calls(), 0);
        assert_eq!(harness.controller.state(), SearchState::Disabled);
    }

    #[tokio::test]
    async fn test_search_before_initialize_is_unavailable() {
        let mut harness = Harness::new(ScriptedLocator::new());
        assert_eq!(harness.controller.search("Los Angeles"), SearchDisposition::Unavailable);
        harness.settle().await;

        assert_eq!(harness.controller.state(), SearchState::Uninitialized);
        assert_eq!(harness.locator.geocode_calls(), 0);
        assert_eq!(harness.locator.load_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_query_is_ignored() {
        let mut harness = Harness::ready(ScriptedLocator::new()).await;

        assert_eq!(harness.controller.search(""), SearchDisposition::Ignored);
        assert_eq!(harness.controller.search("   "), SearchDisposition::Ignored);
        harness.settle().await;

        assert_eq!(harness.controller.state(), SearchState::Ready);
        assert_eq!(harness.controller.last_sequence(), 0);
        assert_eq!(harness.locator.geocode_calls(), 0);
        assert!(harness.view.commands().is_empty());
    }

    #[tokio::test]
    async fn test_search_presents_result() {
        let locator = ScriptedLocator::new().with_result(
            "Los Angeles",
            place("Los Angeles, California", 34.05293, -118.24368),
        );
        let mut harness = Harness::ready(locator).await;

        assert_eq!(harness.controller.search("Los Angeles"), SearchDisposition::Started(1));
        assert_eq!(harness.controller.state(), SearchState::SearchInFlight);
        harness.settle().await;

        assert_eq!(harness.controller.state(), SearchState::SearchIdle);
        assert!(harness.controller.current_session().is_none());
        assert_eq!(harness.view.overlay().markers().count(), 1);
        assert_eq!(harness.labels(), vec!["Los Angeles, California"]);
        assert_eq!(harness.view.viewport().map(|c| c.lat), Some(34.05293));
        assert_eq!(harness.controller.overlay(), Some(harness.view.overlay()));
        assert_eq!(harness.locator.params_seen(), vec![GeocodeParameters::best_match()]);
    }

    #[tokio::test]
    async fn test_first_ranked_result_wins() {
        let locator = ScriptedLocator::new().with_results(
            "Springfield",
            vec![
                place("Springfield, Illinois", 39.80, -89.64),
                place("Springfield, Missouri", 37.21, -93.29),
            ],
        );
        let mut harness = Harness::ready(locator).await;

        harness.controller.search("Springfield");
        harness.settle().await;

        assert_eq!(harness.labels(), vec!["Springfield, Illinois"]);
        assert_eq!(harness.view.overlay().len(), 2);
    }

    #[tokio::test]
    async fn test_no_match_keeps_previous_result() {
        let locator = ScriptedLocator::new()
            .with_result("Pasadena", place("Pasadena, California", 34.14778, -118.14452));
        let mut harness = Harness::ready(locator).await;

        harness.controller.search("Pasadena");
        harness.settle().await;
        harness.controller.search("Atlantis");
        harness.settle().await;

        assert_eq!(harness.view.notices(), vec!["No match found for Atlantis"]);
        assert_eq!(harness.labels(), vec!["Pasadena, California"]);
        assert_eq!(harness.controller.state(), SearchState::SearchIdle);
    }

    #[tokio::test]
    async fn test_no_match_can_clear_previous_result() {
        let locator = ScriptedLocator::new()
            .with_result("Pasadena", place("Pasadena, California", 34.14778, -118.14452));
        let mut harness = Harness::with_settings(
            locator,
            SearchSettings {
                clear_on_no_match: true,
            },
        );
        harness.controller.initialize();
        harness.settle().await;

        harness.controller.search("Pasadena");
        harness.settle().await;
        harness.controller.search("Atlantis");
        harness.settle().await;

        assert!(harness.view.overlay().is_empty());
        assert_eq!(harness.view.notices(), vec!["No match found for Atlantis"]);
    }

    #[tokio::test]
    async fn test_transport_error_is_reported_and_search_continues() {
        let locator = ScriptedLocator::new()
            .with_failure("Malibu", "connection reset")
            .with_result("Venice", place("Venice, California", 33.985, -118.4695));
        let mut harness = Harness::ready(locator).await;

        harness.controller.search("Malibu");
        harness.settle().await;

        let notices = harness.view.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("Malibu"));
        assert!(notices[0].contains("connection reset"));
        assert_eq!(harness.controller.state(), SearchState::SearchIdle);
        assert!(harness.view.overlay().is_empty());

        harness.controller.search("Venice");
        harness.settle().await;
        assert_eq!(harness.labels(), vec!["Venice, California"]);
    }

    #[tokio::test]
    async fn test_new_search_supersedes_pending_one() {
        let locator = ScriptedLocator::new()
            .with_result("slow", place("Slow Result", 10.0, 10.0))
            .holding("slow")
            .with_result("fast", place("Fast Result", 20.0, 20.0));
        let mut harness = Harness::ready(locator).await;

        assert_eq!(harness.controller.search("slow"), SearchDisposition::Started(1));
        tokio::task::yield_now().await;
        assert_eq!(harness.controller.search("fast"), SearchDisposition::Started(2));
        harness.settle().await;

        assert_eq!(harness.labels(), vec!["Fast Result"]);
        assert_eq!(harness.controller.state(), SearchState::SearchIdle);
    }

    #[tokio::test]
    async fn test_late_result_of_superseded_search_is_dropped() {
        let locator = ScriptedLocator::new()
            .with_result("first", place("First Result", 10.0, 10.0))
            .with_result("second", place("Second Result", 20.0, 20.0));
        let mut harness = Harness::ready(locator).await;

        harness.controller.search("first");
        // Let the first request finish and queue its completion before superseding it
        while harness.rx.is_empty() {
            tokio::task::yield_now().await;
        }
        assert_eq!(harness.locator.completed(), 1);
        harness.controller.search("second");
        harness.settle().await;

        assert_eq!(harness.labels(), vec!["Second Result"]);
        let overlay_updates = harness
            .view
            .commands()
            .iter()
            .filter(|c| matches!(c, ViewCommand::UpdateOverlay(_)))
            .count();
        assert_eq!(overlay_updates, 1);
    }

    #[tokio::test]
    async fn test_completion_with_stale_sequence_is_discarded() {
        let locator = ScriptedLocator::new().holding("pending");
        let mut harness = Harness::ready(locator).await;

        harness.controller.search("pending");
        let forged = Completion::new(1, Ok(vec![place("Stale", 1.0, 1.0)]));
        harness.controller.on_search_completed(0, forged, &mut harness.view);

        assert!(harness.view.commands().is_empty());
        assert_eq!(harness.controller.state(), SearchState::SearchInFlight);
        assert_eq!(harness.controller.current_session().map(|s| s.query()), Some("pending"));
    }

    #[tokio::test]
    async fn test_query_during_locator_load_runs_when_ready() {
        let (locator, gate) = ScriptedLocator::new()
            .with_result("Burbank", place("Burbank, California", 34.18, -118.31))
            .gated_load();
        let mut harness = Harness::new(locator);

        harness.controller.initialize();
        assert_eq!(harness.controller.search("Glendale"), SearchDisposition::Deferred);
        assert_eq!(harness.controller.search("Burbank"), SearchDisposition::Deferred);
        assert_eq!(harness.locator.geocode_calls(), 0);

        gate.notify_one();
        harness.settle().await;

        assert_eq!(harness.locator.geocode_calls(), 1);
        assert_eq!(harness.labels(), vec!["Burbank, California"]);
        assert_eq!(harness.controller.last_sequence(), 1);
    }

    #[tokio::test]
    async fn test_sequence_numbers_increase() {
        let mut harness = Harness::ready(ScriptedLocator::new()).await;

        let mut sequences = Vec::new();
        for query in ["a", "b", "c"] {
            if let SearchDisposition::Started(sequence) = harness.controller.search(query) {
                sequences.push(sequence);
            }
        }
        harness.settle().await;

        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(harness.view.notices(), vec!["No match found for c"]);
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            Notice::NoMatch { query: "Atlantis".to_string() }.to_string(),
            "No match found for Atlantis"
        );
        assert_eq!(Notice::GeocodingUnavailable.to_string(), "Geocoding is not available.");
        assert_eq!(
            Notice::RestartRequired.to_string(),
            "Please restart the app to use geocoding feature."
        );
    }
}
