//! Scan completion monitoring using D-Bus property notifications.
//!
//! iwd flips the station's `Scanning` property to `true` when a scan starts
//! and back to `false` once results are published. Instead of sleeping a
//! fixed amount after `Scan()`, the wait below listens for that transition:
//!
//! - it returns as soon as `Scanning` goes `true` → `false`
//! - it gives up after the configured timeout (results so far are used)
//! - it returns early when the cancellation token fires
//! - if the notification stream ends, it falls back to the fixed settle delay
//!
//! The timeout is runtime-agnostic (`futures-timer`), matching the rest of
//! the crate's waits.

use futures::{FutureExt, Stream, StreamExt, select};
use futures_timer::Delay;
use log::{debug, warn};
use std::pin::pin;
use tokio_util::sync::CancellationToken;

use crate::api::models::ScanWait;

/// How a scan wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanWaitOutcome {
    Completed,
    TimedOut,
    Cancelled,
    Settled,
}

/// Waits for a stream of `Scanning` values to report the end of a scan.
///
/// A `false` seen before any `true` is the pre-scan value and is ignored.
pub(crate) async fn wait_for_scan_complete<S>(
    scanning: S,
    wait: &ScanWait,
    cancel: &CancellationToken,
) -> ScanWaitOutcome
where
    S: Stream<Item = bool>,
{
    let mut scanning = pin!(scanning);
    let mut timeout_delay = pin!(Delay::new(wait.timeout).fuse());
    let mut cancelled = pin!(cancel.cancelled().fuse());
    let mut seen_scanning = false;

    loop {
        select! {
            _ = timeout_delay => {
                warn!("Scan did not complete within {:?}; using current results", wait.timeout);
                return ScanWaitOutcome::TimedOut;
            }
            _ = cancelled => {
                debug!("Scan wait cancelled");
                return ScanWaitOutcome::Cancelled;
            }
            value = scanning.next().fuse() => {
                match value {
                    Some(true) => {
                        debug!("Station is scanning");
                        seen_scanning = true;
                    }
                    Some(false) if seen_scanning => {
                        debug!("Scan complete");
                        return ScanWaitOutcome::Completed;
                    }
                    Some(false) => {}
                    None => {
                        debug!("No scan notifications; settling for {:?}", wait.settle);
                        Delay::new(wait.settle).await;
                        return ScanWaitOutcome::Settled;
                    }
                }
            }
        }
    }
}
