//! Station operations driven through the `iwctl` command line.
//!
//! Listing and connecting go through `iwctl` because its `connect
//! --passphrase` path needs no registered D-Bus agent. Disconnecting uses the
//! station's D-Bus method directly.

use log::{debug, info};
use secrecy::{ExposeSecret, SecretString};
use zbus::Connection;

use crate::Result;
use crate::api::models::StationDevice;
use crate::dbus::IwdStationProxy;
use crate::util::command::{CommandRunner, args};

/// Runs `<ctl> station <dev> get-networks` and returns its raw stdout.
pub(crate) async fn get_networks(
    runner: &dyn CommandRunner,
    ctl: &str,
    device: &StationDevice,
) -> Result<String> {
    let argv = args(["station", device.name.as_str(), "get-networks"]);
    let output = runner
        .run(ctl, &argv, None)
        .await?
        .check(format!("{ctl} station {} get-networks", device.name))?;
    Ok(output.stdout)
}

/// Runs `<ctl> station <dev> connect <ssid> [--passphrase <secret>]`.
///
/// The passphrase never appears in logs or in the returned error.
pub(crate) async fn connect_network(
    runner: &dyn CommandRunner,
    ctl: &str,
    device: &StationDevice,
    ssid: &str,
    passphrase: Option<&SecretString>,
) -> Result<()> {
    let description = format!("{ctl} station {} connect {ssid}", device.name);
    let mut argv = args(["station", device.name.as_str(), "connect", ssid]);
    if let Some(secret) = passphrase {
        argv.push("--passphrase".into());
        argv.push(secret.expose_secret().to_string());
    }

    debug!(
        "Running {description}{}",
        if passphrase.is_some() { " --passphrase ***" } else { "" }
    );
    runner.run(ctl, &argv, None).await?.check(description)?;
    info!("Connected to {ssid}");
    Ok(())
}

/// Disconnects the station from its current network.
pub(crate) async fn disconnect_station(conn: &Connection, device: &StationDevice) -> Result<()> {
    let station = IwdStationProxy::builder(conn)
        .path(device.path.clone())?
        .build()
        .await?;
    station.disconnect().await?;
    info!("Disconnected {}", device.name);
    Ok(())
}
