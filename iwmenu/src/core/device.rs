//! Station device discovery.
//!
//! Enumerates iwd's managed objects and picks the radio operating in
//! station mode.

use log::{debug, warn};
use zbus::Connection;
use zbus::fdo::ObjectManagerProxy;

use crate::Result;
use crate::api::models::{ConnectionError, StationDevice};
use crate::dbus::IwdDeviceProxy;
use crate::types::constants::iwd;

/// Locates the station device.
///
/// Returns the first object (in path order) whose interface set includes
/// `net.connman.iwd.Station`. The interface name is read from the same
/// object's `Device.Name`; `fallback_name` is used if that read fails.
pub(crate) async fn locate_station(conn: &Connection, fallback_name: &str) -> Result<StationDevice> {
    let manager = ObjectManagerProxy::builder(conn)
        .destination(iwd::SERVICE)?
        .path(iwd::ROOT_PATH)?
        .build()
        .await?;
    let path = {
        let objects = manager.get_managed_objects().await?;
        debug!("iwd exposes {} managed object(s)", objects.len());

        first_station_path(objects.iter().map(|(path, ifaces)| {
            (
                path.as_str(),
                ifaces.keys().map(|name| name.as_str()).collect::<Vec<_>>(),
            )
        }))
        .ok_or(ConnectionError::NoStationDevice)?
        .to_string()
    };

    let name = match device_name(conn, &path).await {
        Ok(name) if !name.is_empty() => name,
        Ok(_) => fallback_name.to_string(),
        Err(e) => {
            warn!("Failed to read interface name of {path}, using {fallback_name}: {e}");
            fallback_name.to_string()
        }
    };

    debug!("Located station {name} at {path}");
    Ok(StationDevice { path, name })
}

async fn device_name(conn: &Connection, path: &str) -> Result<String> {
    let device = IwdDeviceProxy::builder(conn)
        .path(path.to_string())?
        .build()
        .await?;

    if let Ok(false) = device.powered().await {
        warn!("Station radio at {path} is powered off");
    }

    Ok(device.name().await?)
}

/// Picks the lowest object path that implements the station interface.
fn first_station_path<'a, I>(objects: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, Vec<&'a str>)>,
{
    objects
        .into_iter()
        .filter(|(_, ifaces)| ifaces.contains(&iwd::STATION_IFACE))
        .map(|(path, _)| path)
        .min()
}
