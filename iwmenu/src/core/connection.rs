//! Wi-Fi connection with passphrase acquisition.

use log::debug;
use std::sync::Arc;

use crate::Result;
use crate::api::models::{ConnectionError, NetworkEntry, StationDevice};
use crate::api::network_control::NetworkControl;
use crate::menu::prompt::SecretPrompt;

/// Connects the station to a chosen network.
///
/// Exactly one connect attempt is made per call; there is no retry.
#[derive(Clone)]
pub struct ConnectionController {
    control: Arc<dyn NetworkControl>,
    prompt: Arc<dyn SecretPrompt>,
}

impl ConnectionController {
    pub fn new(control: Arc<dyn NetworkControl>, prompt: Arc<dyn SecretPrompt>) -> Self {
        Self { control, prompt }
    }

    /// Connects `device` to `entry`, asking for a passphrase first when the
    /// network's security requires one.
    ///
    /// # Errors
    ///
    /// - `ConnectionError::NoCredential` if the prompt is cancelled or empty;
    ///   no connect request is issued in that case
    /// - `ConnectionError::Command` if the connect request fails
    pub async fn connect(&self, device: &StationDevice, entry: &NetworkEntry) -> Result<()> {
        let passphrase = if entry.security.requires_secret() {
            let title = format!("Passphrase for {}", entry.ssid);
            match self.prompt.ask(&title).await? {
                Some(secret) => Some(secret),
                None => {
                    debug!("No passphrase given for {}", entry.ssid);
                    return Err(ConnectionError::NoCredential);
                }
            }
        } else {
            None
        };

        self.control
            .connect(device, &entry.ssid, passphrase.as_ref())
            .await
    }
}
