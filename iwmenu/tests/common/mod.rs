#![allow(dead_code)]

use async_trait::async_trait;
use iwmenu::{
    CommandOutput, ConnectionError, NetworkControl, NetworkEntry, Picker, Result, ScanWait,
    SecretPrompt, SecurityKind, SignalBucket, StationDevice,
};
use secrecy::{ExposeSecret, SecretString};
use std::collections::VecDeque;
use std::sync::Mutex;

pub fn wlan0() -> StationDevice {
    StationDevice {
        path: "/net/connman/iwd/0/4".into(),
        name: "wlan0".into(),
    }
}

pub fn psk(ssid: &str, bucket: u8) -> NetworkEntry {
    NetworkEntry {
        ssid: ssid.into(),
        security: SecurityKind::Psk,
        signal: SignalBucket::new(bucket).unwrap(),
        is_current: false,
    }
}

pub fn command_failed(stderr: &str) -> ConnectionError {
    CommandOutput {
        status: Some(1),
        stdout: String::new(),
        stderr: stderr.into(),
    }
    .check("iwctl station wlan0 connect")
    .unwrap_err()
}

/// Scripted station backend that records every call.
#[derive(Default)]
pub struct FakeControl {
    pub listings: Mutex<VecDeque<Result<Vec<NetworkEntry>>>>,
    pub connect_results: Mutex<VecDeque<Result<()>>>,
    pub scan_error: Mutex<Option<ConnectionError>>,
    pub scans: Mutex<usize>,
    pub connects: Mutex<Vec<(String, Option<String>)>>,
    pub missing_device: bool,
}

impl FakeControl {
    pub fn with_listing(entries: Vec<NetworkEntry>) -> Self {
        let fake = Self::default();
        fake.push_listing(Ok(entries));
        fake
    }

    pub fn push_listing(&self, listing: Result<Vec<NetworkEntry>>) {
        self.listings.lock().unwrap().push_back(listing);
    }

    pub fn push_connect(&self, result: Result<()>) {
        self.connect_results.lock().unwrap().push_back(result);
    }

    pub fn scan_count(&self) -> usize {
        *self.scans.lock().unwrap()
    }

    pub fn connect_count(&self) -> usize {
        self.connects.lock().unwrap().len()
    }
}

#[async_trait]
impl NetworkControl for FakeControl {
    async fn locate(&self) -> Result<StationDevice> {
        if self.missing_device {
            Err(ConnectionError::NoStationDevice)
        } else {
            Ok(wlan0())
        }
    }

    async fn scan(&self, _device: &StationDevice, _wait: &ScanWait) -> Result<()> {
        *self.scans.lock().unwrap() += 1;
        match self.scan_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn list(&self, _device: &StationDevice) -> Result<Vec<NetworkEntry>> {
        let mut listings = self.listings.lock().unwrap();
        // The last successful listing repeats once the queue runs dry.
        if listings.len() == 1 {
            if let Some(Ok(entries)) = listings.front() {
                return Ok(entries.clone());
            }
        }
        listings.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn connect(
        &self,
        _device: &StationDevice,
        ssid: &str,
        passphrase: Option<&SecretString>,
    ) -> Result<()> {
        self.connects.lock().unwrap().push((
            ssid.to_string(),
            passphrase.map(|p| p.expose_secret().to_string()),
        ));
        self.connect_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn disconnect(&self, _device: &StationDevice) -> Result<()> {
        Ok(())
    }
}

/// Picker that answers from a script; an exhausted script means dismissal.
#[derive(Default)]
pub struct ScriptedPicker {
    pub replies: Mutex<VecDeque<String>>,
    pub shown: Mutex<Vec<Vec<String>>>,
}

impl ScriptedPicker {
    pub fn new<I: IntoIterator<Item = &'static str>>(replies: I) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(String::from).collect()),
            shown: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Picker for ScriptedPicker {
    async fn pick(&self, options: &[String], _width: usize, _lines: usize) -> Result<String> {
        self.shown.lock().unwrap().push(options.to_vec());
        Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Secret prompt returning a fixed answer.
pub struct FixedPrompt {
    pub answer: Option<&'static str>,
    pub titles: Mutex<Vec<String>>,
}

impl FixedPrompt {
    pub fn new(answer: Option<&'static str>) -> Self {
        Self {
            answer,
            titles: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SecretPrompt for FixedPrompt {
    async fn ask(&self, title: &str) -> Result<Option<SecretString>> {
        self.titles.lock().unwrap().push(title.to_string());
        Ok(self.answer.map(|a| SecretString::from(a.to_string())))
    }
}
