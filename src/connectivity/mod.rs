//! Network reachability probes
//!
//! A probe answers one question, synchronously and without side effects: can
//! the device reach the network right now? How the answer is polled is up to
//! the implementation; callers decide what a negative answer means.

pub mod sysfs;

/// Trait for connectivity probes
pub trait ConnectivityProbe: Send + Sync {
    /// Returns the probe name (e.g., "sysfs", "static")
    fn name(&self) -> &'static str;

    /// Whether the network is currently reachable
    ///
    /// Never fails: a missing network interface reports `false`.
    fn is_available(&self) -> bool;
}

/// A probe with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe {
    online: bool,
}

impl StaticProbe {
    pub fn online() -> Self {
        Self { online: true }
    }

    pub fn offline() -> Self {
        Self { online: false }
    }
}

impl ConnectivityProbe for StaticProbe {
    fn name(&self) -> &'static str {
        "static"
    }

    fn is_available(&self) -> bool {
        self.online
    }
}

/// Get a probe by connectivity mode
///
/// Unknown modes fall back to probing the host
pub fn get_probe(mode: &str) -> Box<dyn ConnectivityProbe> {
    match mode {
        "online" => Box::new(StaticProbe::online()),
        "offline" => Box::new(StaticProbe::offline()),
        _ => Box::new(sysfs::SysfsProbe::new()),
    }
}
