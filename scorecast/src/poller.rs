//! The scheduled fetch-render task behind every view.

use log::debug;
use std::future::Future;
use tokio::{
    select,
    sync::watch,
    task::{self, JoinHandle},
    time::{Duration, MissedTickBehavior, interval},
};

/// A cancellable fixed-interval task.
///
/// Runs one cycle immediately on start, then one per period tick. Cycles
/// are serialized: at most one is ever in flight, and a tick that would
/// have fired mid-cycle is skipped instead of bursted afterwards. A cycle
/// is responsible for its own failure handling; the schedule keeps going
/// regardless of what happened during the last cycle.
pub struct Poller {
    stop_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl Poller {
    pub fn start<F, Fut>(period: Duration, mut cycle: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let join = task::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                select! {
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => cycle().await,
                }
            }
            debug!("Polling task stopped");
        });

        Self { stop_tx, join }
    }

    /// Asks the task to stop after any in-flight cycle completes.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
        self.join.abort();
    }
}
