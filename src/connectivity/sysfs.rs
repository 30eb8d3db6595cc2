//! Interface-table connectivity probe
//!
//! Reads the kernel's network interface table (`/sys/class/net`). The device is
//! considered online when any non-loopback interface reports operstate `up`.

use crate::connectivity::ConnectivityProbe;
use std::fs;
use std::path::PathBuf;

const SYSFS_NET_ROOT: &str = "/sys/class/net";
const LOOPBACK: &str = "lo";

/// Probe backed by the sysfs interface table
#[derive(Debug, Clone)]
pub struct SysfsProbe {
    root: PathBuf,
}

impl SysfsProbe {
    /// Create a probe reading the host's interface table
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(SYSFS_NET_ROOT),
        }
    }

    /// Create a probe reading an interface table at a specific root
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn interface_is_up(&self, name: &str) -> bool {
        fs::read_to_string(self.root.join(name).join("operstate"))
            .map(|state| state.trim() == "up")
            .unwrap_or(false)
    }
}

impl Default for SysfsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityProbe for SysfsProbe {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn is_available(&self) -> bool {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return false;
        };

        entries
            .flatten()
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name != LOOPBACK)
            .any(|name| self.interface_is_up(&name))
    }
}
