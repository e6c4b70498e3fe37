//! Constants for iwd D-Bus names, external tool defaults and menu text.
//!
//! These correspond to the names iwd exposes on the system bus and to the
//! command lines of the external collaborators the menu drives.

/// iwd D-Bus service and interface names.
pub mod iwd {
    pub const SERVICE: &str = "net.connman.iwd";
    pub const ROOT_PATH: &str = "/";
    pub const STATION_IFACE: &str = "net.connman.iwd.Station";
}

/// Default external programs.
pub mod tools {
    pub const STATION_CTL: &str = "iwctl";
    pub const PICKER: &str = "fuzzel";
    pub const NOTIFIER: &str = "notify-send";
    pub const TUNNEL_STATUS: &str = "wg";
    pub const TUNNEL_CONTROL: &str = "wg-quick";
    pub const DEFAULT_INTERFACE: &str = "wlan0";
    pub const VPN_CANDIDATES: &str = "/run/wireguard/connections.list";

    /// Secret prompt command; the title is appended as the last argument.
    pub const SECRET_PROMPT: &[&str] = &["zenity", "--password", "--title"];
}

/// Timeouts for the scan wait.
pub mod timeouts {
    use std::time::Duration;

    /// Upper bound on waiting for iwd to flip `Scanning` back to false.
    const SCAN_TIMEOUT_SECS: u64 = 10;

    /// Fixed delay used when no scan-completion notification is available.
    const SCAN_SETTLE_SECS: u64 = 3;

    pub fn scan_timeout() -> Duration {
        Duration::from_secs(SCAN_TIMEOUT_SECS)
    }

    pub fn scan_settle() -> Duration {
        Duration::from_secs(SCAN_SETTLE_SECS)
    }
}

/// Menu sentinel lines and layout.
pub mod menu {
    pub const SCAN: &str = "Scan";
    pub const BACK: &str = "Back";
    pub const CANCEL: &str = "Cancel";
    pub const WIFI: &str = "WiFi";
    pub const VPN: &str = "VPN";

    /// Extra columns added to the longest option when sizing the picker.
    pub const WIDTH_PADDING: usize = 4;
}

/// Signal glyphs shown in the menu, weakest first.
pub mod signal_glyph {
    pub const BUCKET_1: &str = "󰤯";
    pub const BUCKET_2: &str = "󰤟";
    pub const BUCKET_3: &str = "󰤢";
    pub const BUCKET_4: &str = "󰤥";

    /// Number of `*` cells in an iwctl signal column.
    pub const CELLS: usize = 4;
}
