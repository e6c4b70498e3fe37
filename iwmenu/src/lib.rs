//! A picker-driven connection menu for iwd Wi-Fi and WireGuard tunnels.
//!
//! This crate provides the async building blocks behind the `iwmenu`
//! binary:
//!
//! - Locating the iwd station device and scanning over D-Bus
//! - Parsing `iwctl station <dev> get-networks` listings
//! - Presenting networks through a dmenu-style picker (`fuzzel`)
//! - Connecting with a passphrase collected from a dialog
//! - Switching between WireGuard tunnels, at most one active
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use iwmenu::{
//!     CommandPicker, CommandPrompt, ConnectionController, IwdBackend, NetworkCatalog,
//!     NetworkControl, ScanWait, SelectionMenu, SystemCommandRunner, WifiSession,
//! };
//!
//! # async fn example() -> iwmenu::Result<()> {
//! let runner = Arc::new(SystemCommandRunner);
//! let iwd: Arc<dyn NetworkControl> = Arc::new(IwdBackend::new().await?);
//!
//! let catalog = NetworkCatalog::open(iwd.clone(), ScanWait::default()).await?;
//! let menu = SelectionMenu::new(Arc::new(CommandPicker::new(runner.clone())));
//! let controller = ConnectionController::new(iwd, Arc::new(CommandPrompt::new(runner)));
//!
//! let state = WifiSession::new(catalog, menu, controller).run().await?;
//! println!("{state}");
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ConnectionError>`. Most failures (a
//! rejected passphrase, a busy radio) are recoverable and the menu loop
//! carries on; [`ConnectionError::is_fatal`] marks the ones that are not,
//! such as a missing station device.
//!
//! # Scan Completion
//!
//! Instead of sleeping a fixed time after requesting a scan, the crate
//! watches the station's `Scanning` property and continues as soon as iwd
//! reports the scan finished, bounded by a timeout and cancellable.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. For example:
//!
//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Internal implementation modules
mod core;
mod dbus;
mod menu;
mod types;
mod util;

// Public API modules
pub mod api;

// Re-exported public API
pub use api::config::{MenuConfig, PickerConfig, PromptConfig, ScanConfig, VpnConfig};
pub use api::models::{
    CommandOutput, ConnectionError, MainAction, MenuChoice, NetworkEntry, ScanWait,
    SecurityKind, Sentinel, SessionState, SignalBucket, StationDevice, TunnelInterface,
};
pub use api::network_control::{IwdBackend, NetworkControl};
pub use crate::core::catalog::NetworkCatalog;
pub use crate::core::connection::ConnectionController;
pub use crate::core::parser::parse_networks;
pub use crate::core::session::WifiSession;
pub use crate::core::vpn::{VpnManager, candidates as vpn_candidates};
pub use menu::notify::Notifier;
pub use menu::picker::{CommandPicker, Picker};
pub use menu::prompt::{CommandPrompt, SecretPrompt};
pub use menu::selection::SelectionMenu;
pub use util::command::{CommandRunner, SystemCommandRunner};

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ConnectionError>;
