// Staleness monitor: single-shot, restartable departure timer

use crate::reading::RawReading;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

struct Pending {
    reading: RawReading,
    handle: JoinHandle<()>,
}

/// Fires once if no newer reading supersedes the armed one in time.
///
/// At most one timer is pending: `arm` aborts the previous one before
/// scheduling. The callback runs on the timer task, so owners must marshal it
/// back to the context that owns presence state (the service sends it over a
/// channel) and re-check the reading there.
#[derive(Default)]
pub struct StalenessMonitor {
    pending: Option<Pending>,
}

impl StalenessMonitor {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `on_fire(reading)` after `after`. Must be called from within a
    /// tokio runtime.
    pub fn arm<F>(&mut self, reading: RawReading, after: Duration, on_fire: F)
    where
        F: FnOnce(RawReading) + Send + 'static,
    {
        self.cancel();

        let watched = reading.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            debug!(reading = %watched, "Staleness timer fired");
            on_fire(watched);
        });

        debug!(reading = %reading, after_secs = after.as_secs(), "Staleness timer armed");
        self.pending = Some(Pending { reading, handle });
    }

    /// Abort the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }

    /// Reading the pending timer was armed for
    pub fn armed_for(&self) -> Option<&RawReading> {
        self.pending
            .as_ref()
            .filter(|p| !p.handle.is_finished())
            .map(|p| &p.reading)
    }

    pub fn is_armed(&self) -> bool {
        self.armed_for().is_some()
    }
}

impl Drop for StalenessMonitor {
    fn drop(&mut self) {
        self.cancel();
    }
}
