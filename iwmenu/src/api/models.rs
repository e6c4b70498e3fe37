use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::types::constants::{signal_glyph, timeouts};

/// The wireless radio the menu drives.
///
/// Located once per session from iwd's managed objects. `path` is the D-Bus
/// object implementing `net.connman.iwd.Station`, `name` is the kernel
/// interface name handed to `iwctl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationDevice {
    /// D-Bus object path (e.g. "/net/connman/iwd/0/4")
    pub path: String,
    /// Interface name (e.g. "wlan0")
    pub name: String,
}

/// Security kinds that are surfaced in the menu.
///
/// Open networks are never listed, so there is no `Open` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityKind {
    /// WPA/WPA2/WPA3 pre-shared key.
    Psk,
    /// Legacy WEP key.
    Wep,
}

impl SecurityKind {
    /// Parses the security column of a station listing.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("psk") {
            Some(Self::Psk)
        } else if token.eq_ignore_ascii_case("wep") {
            Some(Self::Wep)
        } else {
            None
        }
    }

    /// Whether joining a network of this kind needs a passphrase.
    pub fn requires_secret(self) -> bool {
        matches!(self, Self::Psk | Self::Wep)
    }
}

impl Display for SecurityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Psk => write!(f, "psk"),
            Self::Wep => write!(f, "WEP"),
        }
    }
}

/// Discretized signal strength, 1 (weakest) through 4 (strongest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SignalBucket(u8);

impl SignalBucket {
    pub const WEAKEST: Self = Self(1);
    pub const STRONGEST: Self = Self(4);

    /// Returns `None` for values outside `1..=4`.
    pub fn new(value: u8) -> Option<Self> {
        (1..=signal_glyph::CELLS as u8)
            .contains(&value)
            .then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Menu glyph for this bucket.
    pub fn glyph(self) -> &'static str {
        match self.0 {
            1 => signal_glyph::BUCKET_1,
            2 => signal_glyph::BUCKET_2,
            3 => signal_glyph::BUCKET_3,
            _ => signal_glyph::BUCKET_4,
        }
    }
}

impl Display for SignalBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/4", self.0)
    }
}

/// A secured network visible to the station.
///
/// Produced fresh on every catalog refresh. `ssid` is never empty.
///
/// # Examples
///
/// ```
/// use iwmenu::parse_networks;
///
/// let entries = parse_networks("Home      psk    ****\n");
/// assert_eq!(entries[0].ssid, "Home");
/// assert_eq!(entries[0].signal.value(), 4);
/// assert!(!entries[0].is_current);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEntry {
    /// Network SSID (name)
    pub ssid: String,
    /// Security kind advertised by the network
    pub security: SecurityKind,
    /// Signal strength bucket
    pub signal: SignalBucket,
    /// Whether the station is currently connected to this network
    pub is_current: bool,
}

impl NetworkEntry {
    /// The line shown for this entry in the picker.
    pub fn display_line(&self) -> String {
        format!("{} {}", self.ssid, self.signal.glyph())
    }
}

/// Fixed menu actions that are not networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Scan,
    Back,
    Cancel,
}

impl Sentinel {
    pub fn label(self) -> &'static str {
        use crate::types::constants::menu;
        match self {
            Self::Scan => menu::SCAN,
            Self::Back => menu::BACK,
            Self::Cancel => menu::CANCEL,
        }
    }
}

/// What the user picked from a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Sentinel(Sentinel),
    Selected(NetworkEntry),
    VpnName(String),
    /// Empty or unrecognised picker output (the picker was dismissed).
    None,
}

/// Choice made in the top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Wifi,
    Vpn,
    Exit,
}

/// A WireGuard interface as reported by the tunnel status tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelInterface {
    pub name: String,
    pub active: bool,
}

/// State of an interactive Wi-Fi session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
    Listing,
    Connecting,
    Connected,
    Failed(String),
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Scanning => write!(f, "Scanning"),
            Self::Listing => write!(f, "Listing"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Connected => write!(f, "Connected"),
            Self::Failed(reason) => write!(f, "Failed ({reason})"),
        }
    }
}

/// How long to wait for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWait {
    /// Upper bound on waiting for the scan-complete notification.
    pub timeout: Duration,
    /// Fixed delay used when no notification stream is available.
    pub settle: Duration,
}

impl Default for ScanWait {
    fn default() -> Self {
        Self {
            timeout: timeouts::scan_timeout(),
            settle: timeouts::scan_settle(),
        }
    }
}

/// Captured result of an external process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Converts a non-zero exit into [`ConnectionError::Command`].
    ///
    /// `command` is the description used in the error and must not contain
    /// secrets.
    pub fn check(self, command: impl Into<String>) -> Result<Self, ConnectionError> {
        if self.success() {
            Ok(self)
        } else {
            Err(ConnectionError::Command {
                command: command.into(),
                status: self.status,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Errors that can occur while driving the station or tunnels.
///
/// # Examples
///
/// ```
/// use iwmenu::ConnectionError;
///
/// let err = ConnectionError::NoCredential;
/// assert_eq!(err.to_string(), "no credential");
/// assert!(!err.is_fatal());
/// assert!(ConnectionError::NoStationDevice.is_fatal());
/// ```
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A standard D-Bus interface call failed.
    #[error("D-Bus error: {0}")]
    Fdo(#[from] zbus::fdo::Error),

    /// iwd exposes no object implementing the station interface.
    #[error("no station device found")]
    NoStationDevice,

    /// The VPN candidate list does not exist.
    #[error("VPN candidate list not found: {}", .0.display())]
    NoVpnCandidates(PathBuf),

    /// The passphrase prompt was cancelled or returned nothing.
    #[error("no credential")]
    NoCredential,

    /// An external command exited unsuccessfully.
    #[error("{command} failed{}: {stderr}", status_suffix(.status))]
    Command {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// An external program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Local I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConnectionError {
    /// Whether the error means a required resource is missing and the
    /// process should exit non-zero.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoStationDevice | Self::NoVpnCandidates(_) | Self::Spawn { .. }
        )
    }
}

fn status_suffix(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" (exit {code})"),
        None => " (terminated)".to_string(),
    }
}
