use async_trait::async_trait;
use log::warn;
use secrecy::SecretString;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use zbus::Connection;

use crate::Result;
use crate::api::models::{NetworkEntry, ScanWait, StationDevice};
use crate::core::device::locate_station;
use crate::core::parser::parse_networks;
use crate::core::scan::scan_station;
use crate::core::station::{connect_network, disconnect_station, get_networks};
use crate::types::constants::tools;
use crate::util::command::{CommandRunner, SystemCommandRunner};

/// The station-control capability the menu is built on.
///
/// Menu, catalog and connection logic only talk to this trait, so a
/// different station backend can be substituted without touching them.
#[async_trait]
pub trait NetworkControl: Send + Sync {
    /// Finds the wireless station device.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::NoStationDevice` if none exists.
    async fn locate(&self) -> Result<StationDevice>;

    /// Triggers a scan and waits for results to settle.
    async fn scan(&self, device: &StationDevice, wait: &ScanWait) -> Result<()>;

    /// Lists visible secured networks in the backend's emission order.
    async fn list(&self, device: &StationDevice) -> Result<Vec<NetworkEntry>>;

    /// Connects to `ssid`, passing the passphrase if one was collected.
    async fn connect(
        &self,
        device: &StationDevice,
        ssid: &str,
        passphrase: Option<&SecretString>,
    ) -> Result<()>;

    /// Disconnects the station from its current network.
    async fn disconnect(&self, device: &StationDevice) -> Result<()>;
}

/// [`NetworkControl`] backed by iwd.
///
/// Device discovery and scanning go over the system D-Bus; listing and
/// connecting use `iwctl`, whose table output is parsed.
///
/// # Example
///
/// ```no_run
/// use iwmenu::{IwdBackend, NetworkControl, ScanWait};
///
/// # async fn example() -> iwmenu::Result<()> {
/// let iwd = IwdBackend::new().await?;
/// let device = iwd.locate().await?;
/// iwd.scan(&device, &ScanWait::default()).await?;
/// for net in iwd.list(&device).await? {
///     println!("{} {}", net.ssid, net.signal);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IwdBackend {
    conn: Connection,
    runner: Arc<dyn CommandRunner>,
    station_ctl: String,
    fallback_interface: String,
    cancel: CancellationToken,
}

impl IwdBackend {
    /// Connects to the system bus with default tool settings.
    pub async fn new() -> Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self::with_connection(conn, Arc::new(SystemCommandRunner)))
    }

    /// Builds a backend on an existing bus connection and process runner.
    pub fn with_connection(conn: Connection, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            conn,
            runner,
            station_ctl: tools::STATION_CTL.to_string(),
            fallback_interface: tools::DEFAULT_INTERFACE.to_string(),
            cancel: CancellationToken::new(),
        }
    }

    /// Overrides the station-control executable (default `iwctl`).
    pub fn station_ctl(mut self, program: impl Into<String>) -> Self {
        self.station_ctl = program.into();
        self
    }

    /// Interface name used when iwd does not report one.
    pub fn fallback_interface(mut self, name: impl Into<String>) -> Self {
        self.fallback_interface = name.into();
        self
    }

    /// Shares `token` with the scan wait; cancelling it cuts an in-progress
    /// wait short.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }
}

#[async_trait]
impl NetworkControl for IwdBackend {
    async fn locate(&self) -> Result<StationDevice> {
        locate_station(&self.conn, &self.fallback_interface).await
    }

    async fn scan(&self, device: &StationDevice, wait: &ScanWait) -> Result<()> {
        scan_station(&self.conn, device, wait, &self.cancel).await?;
        Ok(())
    }

    async fn list(&self, device: &StationDevice) -> Result<Vec<NetworkEntry>> {
        let raw = get_networks(self.runner.as_ref(), &self.station_ctl, device).await?;
        let entries = parse_networks(&raw);
        if entries.is_empty() && !raw.trim().is_empty() {
            warn!("No secured networks parsed from {} listing", self.station_ctl);
        }
        Ok(entries)
    }

    async fn connect(
        &self,
        device: &StationDevice,
        ssid: &str,
        passphrase: Option<&SecretString>,
    ) -> Result<()> {
        connect_network(
            self.runner.as_ref(),
            &self.station_ctl,
            device,
            ssid,
            passphrase,
        )
        .await
    }

    async fn disconnect(&self, device: &StationDevice) -> Result<()> {
        disconnect_station(&self.conn, device).await
    }
}
