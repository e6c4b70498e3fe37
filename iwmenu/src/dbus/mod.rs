//! D-Bus proxy interfaces for iwd.
//!
//! iwd publishes one object per radio that implements both
//! `net.connman.iwd.Device` and, in station mode, `net.connman.iwd.Station`.
//! Objects are discovered through the standard
//! `org.freedesktop.DBus.ObjectManager` interface at `/`.

mod device;
mod station;

pub(crate) use device::IwdDeviceProxy;
pub(crate) use station::IwdStationProxy;
