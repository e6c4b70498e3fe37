//! Core internal logic.
//!
//! Device discovery, scanning, listing and parsing, plus the catalog,
//! connection controller, tunnel manager and the session loop built on them.

pub(crate) mod catalog;
pub(crate) mod connection;
pub(crate) mod device;
pub(crate) mod parser;
pub(crate) mod scan;
pub(crate) mod session;
pub(crate) mod state_wait;
pub(crate) mod station;
pub(crate) mod vpn;
