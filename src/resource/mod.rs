//! Loadable resources
//!
//! A [`LoadableResource`] wraps anything that has to be fetched asynchronously
//! before it can be used: the locator service, the offline map package, the
//! outcome of one search. Every load site shares the same rules:
//!
//! - state moves `NotLoaded -> Loading -> Loaded | Failed` and never back into
//!   `Loading` without [`LoadableResource::reset`] or a cancellation
//! - the background work runs on a tokio task, but its outcome is only applied
//!   when the owner hands the [`Completion`] back to
//!   [`LoadableResource::complete`] on its own control thread
//! - every `load()` is stamped with a ticket, so a completion from a cancelled
//!   or superseded load is recognised and dropped

use crate::error::{Error, Result};
use std::future::Future;
use std::pin::Pin;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

/// Boxed future produced by the services behind a resource
pub type LoadFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Load state of a resource
#[derive(Debug)]
pub enum LoadState<T> {
    NotLoaded,
    Loading,
    Loaded(T),
    Failed(Error),
}

impl<T> LoadState<T> {
    /// Short name of the state, for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotLoaded => "not_loaded",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Outcome of one `load()` call, delivered back to the owner
#[derive(Debug)]
pub struct Completion<T> {
    ticket: u64,
    outcome: Result<T>,
}

impl<T> Completion<T> {
    pub fn new(ticket: u64, outcome: Result<T>) -> Self {
        Self { ticket, outcome }
    }

    /// Ticket of the load that produced this completion
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

/// An asynchronously loaded value with single-delivery completion
#[derive(Debug)]
pub struct LoadableResource<T> {
    name: String,
    state: LoadState<T>,
    ticket: u64,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> LoadableResource<T> {
    /// Create a resource in the `NotLoaded` state
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: LoadState::NotLoaded,
            ticket: 0,
            task: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Ticket of the most recent `load()`
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// The loaded value, if any
    pub fn value(&self) -> Option<&T> {
        match &self.state {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Start loading
    ///
    /// `fetch` runs on a tokio task; when it finishes, `deliver` is called
    /// exactly once with the resulting [`Completion`]. A panicking `fetch` is
    /// delivered as a failed load. Returns `false` without doing anything
    /// unless the resource is `NotLoaded`.
    pub fn load<F, D>(&mut self, fetch: F, deliver: D) -> bool
    where
        F: Future<Output = Result<T>> + Send + 'static,
        D: FnOnce(Completion<T>) + Send + 'static,
    {
        if !matches!(self.state, LoadState::NotLoaded) {
            debug!(
                resource = %self.name,
                state = self.state.label(),
                "Ignoring load request"
            );
            return false;
        }

        self.ticket += 1;
        let ticket = self.ticket;
        let name = self.name.clone();
        self.state = LoadState::Loading;
        self.task = Some(tokio::spawn(async move {
            // The fetch runs on its own task so a panic surfaces as a JoinError
            let fetch = tokio::spawn(fetch);
            let _guard = AbortOnDrop(fetch.abort_handle());
            let outcome = match fetch.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => return,
                Err(e) => Err(Error::load_failed(name, e)),
            };
            deliver(Completion::new(ticket, outcome));
        }));

        debug!(resource = %self.name, ticket, "Loading");
        true
    }

    /// Abandon an in-flight load
    ///
    /// Aborting is advisory: the task may already have delivered its
    /// completion, which [`complete`](Self::complete) will then drop.
    /// Returns `false` if the resource was not loading.
    pub fn cancel(&mut self) -> bool {
        if !self.is_loading() {
            return false;
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state = LoadState::NotLoaded;
        debug!(resource = %self.name, ticket = self.ticket, "Load cancelled");
        true
    }

    /// Apply a completion
    ///
    /// Returns the new state, or `None` when the completion is stale (the
    /// resource is no longer loading, or the ticket belongs to an earlier load).
    pub fn complete(&mut self, completion: Completion<T>) -> Option<&LoadState<T>> {
        if !self.is_loading() || completion.ticket != self.ticket {
            debug!(
                resource = %self.name,
                ticket = completion.ticket,
                current = self.ticket,
                "Dropping stale completion"
            );
            return None;
        }

        self.task = None;
        self.state = match completion.outcome {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Failed(e),
        };
        debug!(resource = %self.name, state = self.state.label(), "Load finished");
        Some(&self.state)
    }

    /// Move the current state out, leaving `NotLoaded`
    pub fn take_state(&mut self) -> LoadState<T> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        std::mem::replace(&mut self.state, LoadState::NotLoaded)
    }

    /// Return to `NotLoaded`, cancelling an in-flight load
    pub fn reset(&mut self) {
        self.cancel();
        self.state = LoadState::NotLoaded;
    }
}

/// Aborts the fetch task when the load task is aborted
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl<T> Drop for LoadableResource<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
