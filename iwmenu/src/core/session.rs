//! The interactive Wi-Fi menu loop.
//!
//! ```text
//! Idle --scan--> Scanning --results--> Listing --select--> Connecting
//! Connecting --success--> Connected
//! Connecting --failure--> Failed(reason) --> Listing
//! Listing --"Scan"--> Scanning
//! Listing --"Back"/dismiss--> Idle
//! ```

use log::{debug, warn};

use crate::Result;
use crate::api::models::{MenuChoice, Sentinel, SessionState};
use crate::core::catalog::NetworkCatalog;
use crate::core::connection::ConnectionController;
use crate::menu::notify::Notifier;
use crate::menu::selection::SelectionMenu;

const SCAN_NOTICE: &str = "Scanning for networks.";

/// Drives one interactive Wi-Fi session until the user connects or leaves.
pub struct WifiSession {
    catalog: NetworkCatalog,
    menu: SelectionMenu,
    controller: ConnectionController,
    notifier: Option<Notifier>,
    state: SessionState,
}

impl WifiSession {
    pub fn new(
        catalog: NetworkCatalog,
        menu: SelectionMenu,
        controller: ConnectionController,
    ) -> Self {
        Self {
            catalog,
            menu,
            controller,
            notifier: None,
            state: SessionState::Idle,
        }
    }

    /// Announces each user-requested rescan through `notifier`.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs the menu loop.
    ///
    /// Returns the terminal state: `Connected` after a successful connect,
    /// `Idle` when the user backed out. Failed connects are reported and
    /// the loop returns to the listing; only fatal errors end it early.
    pub async fn run(&mut self) -> Result<SessionState> {
        self.scan().await?;

        loop {
            self.transition(SessionState::Listing);
            let choice = self.menu.present(self.catalog.entries()).await?;
            match choice {
                MenuChoice::Sentinel(Sentinel::Scan) => {
                    if let Some(notifier) = &self.notifier {
                        notifier.notify(SCAN_NOTICE).await;
                    }
                    self.scan().await?
                }
                MenuChoice::Selected(entry) => {
                    self.transition(SessionState::Connecting);
                    match self.controller.connect(self.catalog.device(), &entry).await {
                        Ok(()) => {
                            self.transition(SessionState::Connected);
                            return Ok(self.state.clone());
                        }
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => {
                            warn!("Connecting to {} failed: {e}", entry.ssid);
                            eprintln!("Failed to connect to {}: {e}", entry.ssid);
                            self.transition(SessionState::Failed(e.to_string()));
                        }
                    }
                }
                MenuChoice::Sentinel(Sentinel::Back | Sentinel::Cancel)
                | MenuChoice::VpnName(_)
                | MenuChoice::None => {
                    self.transition(SessionState::Idle);
                    return Ok(self.state.clone());
                }
            }
        }
    }

    async fn scan(&mut self) -> Result<()> {
        self.transition(SessionState::Scanning);
        self.catalog.refresh().await?;
        Ok(())
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session {} -> {next}", self.state);
        self.state = next;
    }
}
