//! Public API module.
//!
//! This module contains the user-facing types of the `iwmenu` crate: data
//! models and errors, the [`NetworkControl`](network_control::NetworkControl)
//! seam with its iwd implementation, and the menu configuration.

pub mod config;
pub mod models;
pub mod network_control;
