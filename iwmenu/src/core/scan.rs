//! Wi-Fi scanning.
//!
//! Requests a scan from iwd and waits for the station to publish results.

use futures::StreamExt;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;
use zbus::Connection;

use crate::Result;
use crate::api::models::{ScanWait, StationDevice};
use crate::core::state_wait::{ScanWaitOutcome, wait_for_scan_complete};
use crate::dbus::IwdStationProxy;

/// Triggers a scan on `device` and waits for it to settle.
///
/// Subscribes to `Scanning` changes before calling `Scan()` so the start of
/// the scan cannot be missed. Errors from the scan request itself are
/// returned; the caller treats them as non-fatal.
pub(crate) async fn scan_station(
    conn: &Connection,
    device: &StationDevice,
    wait: &ScanWait,
    cancel: &CancellationToken,
) -> Result<ScanWaitOutcome> {
    let station = IwdStationProxy::builder(conn)
        .path(device.path.clone())?
        .build()
        .await?;

    let changes = station.receive_scanning_changed().await;
    station.scan().await?;
    debug!("Scan requested on {}", device.name);

    let scanning = changes.filter_map(|change| async move {
        match change.get().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to read Scanning property: {e}");
                None
            }
        }
    });

    let outcome = wait_for_scan_complete(scanning, wait, cancel).await;
    if let Ok(state) = station.state().await {
        debug!("Station {} is {state} after scan ({outcome:?})", device.name);
    }
    Ok(outcome)
}
