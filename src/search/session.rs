//! One user query and its pending outcome

use crate::geo::GeocodeResult;
use crate::resource::LoadableResource;
use chrono::{DateTime, Utc};

/// A single geocode search
///
/// Dropping a session aborts its request.
#[derive(Debug)]
pub struct SearchSession {
    query: String,
    sequence: u64,
    started_at: DateTime<Utc>,
    pub(crate) outcome: LoadableResource<Vec<GeocodeResult>>,
}

impl SearchSession {
    pub(crate) fn new(query: impl Into<String>, sequence: u64) -> Self {
        Self {
            query: query.into(),
            sequence,
            started_at: Utc::now(),
            outcome: LoadableResource::new(format!("search #{}", sequence)),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Milliseconds since the session started
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}
