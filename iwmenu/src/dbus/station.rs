//! iwd Station proxy.

use zbus::{Result, proxy};

/// Proxy for the iwd station interface.
///
/// `Scan` returns as soon as the scan is queued. Completion is observed
/// through the `Scanning` property, which iwd flips to `true` while the
/// radio scans and back to `false` once results are published:
///
/// ```ignore
/// let mut stream = station.receive_scanning_changed().await;
/// station.scan().await?;
/// while let Some(change) = stream.next().await {
///     if !change.get().await? {
///         break;
///     }
/// }
/// ```
#[proxy(interface = "net.connman.iwd.Station", default_service = "net.connman.iwd")]
pub trait IwdStation {
    /// Requests a scan. Fails with `net.connman.iwd.Busy` if one is running.
    fn scan(&self) -> Result<()>;

    /// Disconnects from the current network.
    fn disconnect(&self) -> Result<()>;

    /// Whether a scan is in progress.
    #[zbus(property)]
    fn scanning(&self) -> Result<bool>;

    /// Connection state ("connected", "disconnected", "connecting", ...).
    #[zbus(property)]
    fn state(&self) -> Result<String>;
}
