use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::availability::snapshot::AvailabilitySnapshot;
use crate::catalog::ScheduleCatalog;
use crate::clock::Clock;

/// Periodically re-evaluates the catalog and publishes the latest
/// [`AvailabilitySnapshot`] to subscribers.
pub struct AvailabilityFeed {
    receiver: watch::Receiver<AvailabilitySnapshot>,
    shutdown: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl AvailabilityFeed {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

    /// Evaluates once immediately, then once per `period`. Must be called
    /// from within a tokio runtime.
    pub fn spawn(
        catalog: Arc<ScheduleCatalog>,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> Result<Self> {
        ensure!(!period.is_zero(), "availability feed period must be > 0");

        let initial = AvailabilitySnapshot::capture(&catalog, clock.now());
        log_snapshot(&initial);

        let (sender, receiver) = watch::channel(initial);
        let (shutdown, mut shutdown_receiver) = broadcast::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            /* The first tick completes immediately and the initial snapshot is already published */
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let snapshot = AvailabilitySnapshot::capture(&catalog, clock.now());

                        if sender.borrow().same_ids(&snapshot) {
                            debug!(at = %snapshot.at, available = snapshot.available.len(), "availability unchanged");
                        } else {
                            log_snapshot(&snapshot);
                        }

                        if sender.send(snapshot).is_err() {
                            debug!("availability feed has no subscribers left");
                            break;
                        }
                    }
                    _ = shutdown_receiver.recv() => {
                        info!("availability feed shutting down");
                        break;
                    }
                }
            }
        });

        info!(period = ?period, "availability feed started");

        Ok(Self {
            receiver,
            shutdown,
            task,
        })
    }

    /// A receiver that always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<AvailabilitySnapshot> {
        self.receiver.clone()
    }

    pub fn latest(&self) -> AvailabilitySnapshot {
        self.receiver.borrow().clone()
    }

    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown.send(());

        self.task.await.context("availability feed task failed")
    }
}

fn log_snapshot(snapshot: &AvailabilitySnapshot) {
    if snapshot.is_empty() {
        warn!(at = %snapshot.at, "no instruments currently available");
    } else {
        info!(at = %snapshot.at, available = ?snapshot.available, "available instruments updated");
    }
}
