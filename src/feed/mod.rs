mod client;
mod error;

pub use client::{FixSource, HttpFixSource};
pub use error::FeedError;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

use crate::sim::Simulator;

/// Fetches a fresh fix set on a fixed interval (or sooner, when `refresh` is
/// notified) and hands it to the scheduler. A failed fetch keeps the
/// previous tracked set and reference time; the scheduler keeps extrapolating
/// against the last good fixes.
pub async fn run_refresh_loop<S: FixSource>(
    source: S,
    simulator: Arc<Mutex<Simulator>>,
    interval: Duration,
    refresh: Arc<Notify>,
) {
    loop {
        match source.fetch().await {
            Ok(set) => {
                log::info!("feed refresh: {} fixes", set.fixes.len());
                simulator.lock().await.load_fixes(set).await;
            }
            Err(e) => {
                log::warn!("feed refresh failed, keeping previous fix set: {e}");
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = refresh.notified() => {
                log::info!("manual refresh requested");
            }
        }
    }
}
