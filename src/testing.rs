//! Scripted services for tests
//!
//! Stand-ins for the locator service and the offline package reader whose
//! answers, failures and timing are fixed up front.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::{Attributes, GeocodeParameters, GeocodeResult, Locator, LocatorInfo};
use crate::map::{MapDefinition, PackageLoader};
use crate::resource::LoadFuture;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Build a result carrying its label as the `Match_addr` attribute
pub fn place(label: &str, lat: f64, lng: f64) -> GeocodeResult {
    let mut attributes = Attributes::new();
    attributes.insert("Match_addr".to_string(), serde_json::json!(label));
    GeocodeResult {
        label: label.to_string(),
        location: Coordinates::new(lat, lng),
        attributes,
    }
}

#[derive(Debug, Clone)]
enum Answer {
    Results(Vec<GeocodeResult>),
    Fail(String),
}

/// A locator with canned answers per query
///
/// Unknown queries return no results.
#[derive(Debug, Default)]
pub struct ScriptedLocator {
    load_fails: bool,
    load_gate: Option<Arc<Notify>>,
    answers: HashMap<String, Answer>,
    held: HashSet<String>,
    params_seen: Mutex<Vec<GeocodeParameters>>,
    load_calls: AtomicUsize,
    geocode_calls: AtomicUsize,
    completed: AtomicUsize,
}

impl ScriptedLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with a single result
    pub fn with_result(mut self, query: &str, result: GeocodeResult) -> Self {
        self.answers
            .insert(query.to_string(), Answer::Results(vec![result]));
        self
    }

    /// Answer `query` with several ranked results
    pub fn with_results(mut self, query: &str, results: Vec<GeocodeResult>) -> Self {
        self.answers.insert(query.to_string(), Answer::Results(results));
        self
    }

    /// Fail `query` with a transport error
    pub fn with_failure(mut self, query: &str, message: &str) -> Self {
        self.answers
            .insert(query.to_string(), Answer::Fail(message.to_string()));
        self
    }

    /// Never answer `query`
    pub fn holding(mut self, query: &str) -> Self {
        self.held.insert(query.to_string());
        self
    }

    /// Make the service fail to load
    pub fn failing_load(mut self) -> Self {
        self.load_fails = true;
        self
    }

    /// Keep `load()` pending until the returned handle is notified
    pub fn gated_load(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.load_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Number of geocode requests issued
    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    /// Number of geocode requests that produced an answer
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Parameters sent with each geocode request
    pub fn params_seen(&self) -> Vec<GeocodeParameters> {
        self.params_seen.lock().unwrap().clone()
    }
}

impl Locator for ScriptedLocator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn load(&self) -> LoadFuture<'_, LocatorInfo> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if let Some(gate) = &self.load_gate {
                gate.notified().await;
            }
            if self.load_fails {
                return Err(Error::load_failed("locator", "service unavailable"));
            }
            Ok(LocatorInfo {
                description: Some("scripted".to_string()),
                capabilities: vec!["Geocode".to_string()],
            })
        })
    }

    fn geocode<'a>(
        &'a self,
        query: &'a str,
        params: &'a GeocodeParameters,
    ) -> LoadFuture<'a, Vec<GeocodeResult>> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        self.params_seen.lock().unwrap().push(params.clone());
        Box::pin(async move {
            if self.held.contains(query) {
                std::future::pending::<()>().await;
            }

            let answer = self
                .answers
                .get(query)
                .cloned()
                .unwrap_or(Answer::Results(Vec::new()));
            self.completed.fetch_add(1, Ordering::SeqCst);

            match answer {
                Answer::Results(results) => Ok(results),
                Answer::Fail(message) => Err(Error::Transport(message)),
            }
        })
    }
}

/// A package reader with a fixed outcome
#[derive(Debug)]
pub struct ScriptedPackages {
    maps: Option<Vec<MapDefinition>>,
    panics: bool,
    calls: AtomicUsize,
}

impl ScriptedPackages {
    pub fn with_maps(maps: Vec<MapDefinition>) -> Self {
        Self {
            maps: Some(maps),
            panics: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            maps: None,
            panics: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Panic while reading the package
    pub fn panicking() -> Self {
        Self {
            maps: None,
            panics: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PackageLoader for ScriptedPackages {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a, Vec<MapDefinition>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if self.panics {
                panic!("corrupt package {}", path.display());
            }
            self.maps.clone().ok_or_else(|| {
                Error::load_failed(format!("offline package {}", path.display()), "file not found")
            })
        })
    }
}
