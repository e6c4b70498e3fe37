//! iwd Device proxy.

use zbus::{Result, proxy};

/// Proxy for the iwd device interface.
#[proxy(interface = "net.connman.iwd.Device", default_service = "net.connman.iwd")]
pub trait IwdDevice {
    /// The network interface name (e.g., "wlan0").
    #[zbus(property)]
    fn name(&self) -> Result<String>;

    /// Whether the radio is powered.
    #[zbus(property)]
    fn powered(&self) -> Result<bool>;
}
