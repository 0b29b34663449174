//! # Scan Status Polling
//!
//! Watches the scanner's status resource at a fixed interval and stops by
//! itself once no scan is active. The caller can cancel at any time; after a
//! cancel no further updates are delivered.

use std::sync::Arc;
use std::time::Duration;

use assetr_common::config::Config;
use assetr_common::inventory::scan::ScanStatus;
use assetr_common::ports::scan_status::ScanStatusSource;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The scanner reported no active scan; holds that final status.
    Idle(ScanStatus),
    Cancelled,
}

pub struct ScanPoller {
    source: Arc<dyn ScanStatusSource>,
    interval: Duration,
}

impl ScanPoller {
    pub fn new(source: Arc<dyn ScanStatusSource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    pub fn from_config(source: Arc<dyn ScanStatusSource>, cfg: &Config) -> Self {
        Self::new(source, cfg.poll_interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Polls until the scan goes idle or `cancel` flips to `true`.
    ///
    /// The first poll happens immediately. A failed poll is logged and retried
    /// on the next tick. `on_update` sees every successful status, the final
    /// idle one included.
    pub async fn run_until_idle<F>(&self, mut cancel: watch::Receiver<bool>, mut on_update: F) -> PollOutcome
    where
        F: FnMut(&ScanStatus),
    {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *cancel.borrow() {
                return PollOutcome::Cancelled;
            }

            tokio::select! {
                biased;
                changed = cancel.changed() => {
                    // a dropped sender counts as a cancel
                    if changed.is_err() || *cancel.borrow() {
                        debug!("scan polling cancelled");
                        return PollOutcome::Cancelled;
                    }
                }
                _ = ticker.tick() => {
                    let status = match self.source.scan_status().await {
                        Ok(status) => status,
                        Err(e) => {
                            warn!("scan status poll failed: {e:#}");
                            continue;
                        }
                    };

                    if *cancel.borrow() {
                        return PollOutcome::Cancelled;
                    }

                    on_update(&status);
                    if !status.active {
                        debug!(scan_id = ?status.scan_id, "scan finished, polling stopped");
                        return PollOutcome::Idle(status);
                    }
                }
            }
        }
    }

    /// Runs the poller on its own task, forwarding each status to `updates`.
    pub fn spawn(self, updates: mpsc::UnboundedSender<ScanStatus>) -> PollHandle {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            self.run_until_idle(cancel_rx, |status| {
                // receiver gone means nobody is listening anymore; the cancel
                // path or the idle status ends the loop
                let _ = updates.send(status.clone());
            })
            .await
        });

        PollHandle {
            cancel: cancel_tx,
            task: Some(task),
        }
    }
}

/// Owner of a spawned poller. Dropping it stops the task.
pub struct PollHandle {
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<PollOutcome>>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Waits for the poller to stop.
    pub async fn join(mut self) -> anyhow::Result<PollOutcome> {
        match self.task.take() {
            Some(task) => Ok(task.await?),
            None => Ok(PollOutcome::Cancelled),
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.cancel.send_replace(true);
            task.abort();
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
