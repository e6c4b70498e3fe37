//! The refreshable list of visible networks.

use log::{debug, warn};
use std::sync::Arc;

use crate::Result;
use crate::api::models::{NetworkEntry, ScanWait, StationDevice};
use crate::api::network_control::NetworkControl;

/// Networks visible to the station, refreshed on demand.
///
/// The device is located once, when the catalog is opened. Each refresh
/// triggers a hardware scan, so it should run once at session start and
/// once per explicit rescan.
pub struct NetworkCatalog {
    control: Arc<dyn NetworkControl>,
    device: StationDevice,
    wait: ScanWait,
    entries: Vec<NetworkEntry>,
}

impl NetworkCatalog {
    /// Locates the station device.
    ///
    /// # Errors
    ///
    /// Fails with `ConnectionError::NoStationDevice` if there is none.
    pub async fn open(control: Arc<dyn NetworkControl>, wait: ScanWait) -> Result<Self> {
        let device = control.locate().await?;
        Ok(Self {
            control,
            device,
            wait,
            entries: Vec::new(),
        })
    }

    pub fn device(&self) -> &StationDevice {
        &self.device
    }

    pub fn wait(&self) -> &ScanWait {
        &self.wait
    }

    /// Entries from the last successful listing.
    pub fn entries(&self) -> &[NetworkEntry] {
        &self.entries
    }

    /// Scans, then re-lists networks in the order the backend emits them.
    ///
    /// Scan failures are logged and the listing proceeds. A listing failure
    /// keeps the previous entries. Only fatal errors are returned.
    pub async fn refresh(&mut self) -> Result<&[NetworkEntry]> {
        match self.control.scan(&self.device, &self.wait).await {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => warn!("Scan on {} failed: {e}", self.device.name),
        }

        match self.control.list(&self.device).await {
            Ok(entries) => {
                debug!("Catalog holds {} network(s)", entries.len());
                self.entries = entries;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => warn!(
                "Listing networks on {} failed, keeping {} previous: {e}",
                self.device.name,
                self.entries.len()
            ),
        }
        Ok(&self.entries)
    }
}
