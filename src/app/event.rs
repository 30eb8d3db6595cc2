//! Completion events delivered to the control loop

use crate::geo::{GeocodeResult, LocatorInfo};
use crate::map::MapDefinition;
use crate::resource::Completion;
use tokio::sync::mpsc;

/// Something that finished off the control thread
#[derive(Debug)]
pub enum Event {
    /// The offline package finished loading
    PackageLoaded(Completion<Vec<MapDefinition>>),

    /// The locator service finished loading
    LocatorLoaded(Completion<LocatorInfo>),

    /// A geocode request finished
    SearchCompleted {
        sequence: u64,
        completion: Completion<Vec<GeocodeResult>>,
    },
}

impl Event {
    /// Short name of the event, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PackageLoaded(_) => "package_loaded",
            Self::LocatorLoaded(_) => "locator_loaded",
            Self::SearchCompleted { .. } => "search_completed",
        }
    }
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Create the control loop's event channel
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
