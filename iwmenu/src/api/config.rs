//! User configuration.
//!
//! Every field has a default, so an empty or partial file is valid. The
//! binary reads it from `$XDG_CONFIG_HOME/iwmenu/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::models::ScanWait;
use crate::types::constants::{menu, timeouts, tools};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Interface name used when iwd does not report one.
    pub interface: String,
    /// Station-control executable.
    pub station_ctl: String,
    /// Announce scans with desktop notifications.
    pub notifications: bool,
    pub picker: PickerConfig,
    pub prompt: PromptConfig,
    pub scan: ScanConfig,
    pub vpn: VpnConfig,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            interface: tools::DEFAULT_INTERFACE.to_string(),
            station_ctl: tools::STATION_CTL.to_string(),
            notifications: true,
            picker: PickerConfig::default(),
            prompt: PromptConfig::default(),
            scan: ScanConfig::default(),
            vpn: VpnConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub program: String,
    /// Passed to the picker as `--config=<path>`.
    pub config: Option<PathBuf>,
    /// Appended after the generated flags.
    pub args: Vec<String>,
    /// Columns added to the longest option.
    pub padding: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            program: tools::PICKER.to_string(),
            config: None,
            args: Vec::new(),
            padding: menu::WIDTH_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Program and leading arguments; the title is appended.
    pub command: Vec<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            command: tools::SECRET_PROMPT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub timeout_secs: u64,
    pub settle_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: timeouts::scan_timeout().as_secs(),
            settle_secs: timeouts::scan_settle().as_secs(),
        }
    }
}

impl ScanConfig {
    pub fn wait(&self) -> ScanWait {
        ScanWait {
            timeout: Duration::from_secs(self.timeout_secs),
            settle: Duration::from_secs(self.settle_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpnConfig {
    pub status_tool: String,
    pub control_tool: String,
    /// File listing tunnel names, one per line.
    pub candidates: PathBuf,
    /// Prefix for privileged tunnel commands, e.g. `["sudo", "-A"]`.
    pub elevate: Vec<String>,
}

impl Default for VpnConfig {
    fn default() -> Self {
        Self {
            status_tool: tools::TUNNEL_STATUS.to_string(),
            control_tool: tools::TUNNEL_CONTROL.to_string(),
            candidates: PathBuf::from(tools::VPN_CANDIDATES),
            elevate: Vec::new(),
        }
    }
}
