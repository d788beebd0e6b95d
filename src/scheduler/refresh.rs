//! Background polling that keeps view snapshots fresh.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Anything that can produce a fresh snapshot for the dashboard.
///
/// Implementations wrap whatever backend call feeds a panel. Errors are
/// logged and swallowed by the poll loop so one bad fetch never tears the
/// panel down.
#[async_trait]
pub trait SnapshotSource {
    type Snapshot: Clone + Send + Sync + 'static;

    async fn fetch(&self) -> anyhow::Result<Self::Snapshot>;
}

/// Handle to one running poll loop.
///
/// Dropping the handle stops the loop. [`RefreshTask::cancel`] stops it
/// explicitly without giving up access to the last snapshot.
pub struct RefreshTask<T> {
    rx: watch::Receiver<T>,
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> RefreshTask<T> {
    /// Clone of the most recent snapshot.
    pub fn latest(&self) -> T {
        self.rx.borrow().clone()
    }

    /// A receiver that wakes on every replaced snapshot.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }

    /// Ask the loop to stop after the current iteration.
    pub fn cancel(&self) {
        let _ = self.stop.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn a poll loop that replaces the snapshot every `every` tick.
///
/// The first fetch fires immediately; `initial` only covers the gap until
/// it lands. A failed fetch keeps the previous snapshot. `every` must be
/// non-zero.
pub fn spawn_refresh<S>(
    name: &'static str,
    every: Duration,
    initial: S::Snapshot,
    source: S,
) -> RefreshTask<S::Snapshot>
where
    S: SnapshotSource + Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(initial);
    let (stop, mut stop_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Both an explicit cancel and a dropped handle land here.
                _ = stop_rx.changed() => break,
                _ = ticker.tick() => {
                    match source.fetch().await {
                        Ok(snapshot) => {
                            if tx.send(snapshot).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(task = name, ?e, "refresh fetch failed, keeping previous snapshot");
                        }
                    }
                }
            }
        }

        debug!(task = name, "refresh loop stopped");
    });

    RefreshTask { rx, stop, handle }
}
