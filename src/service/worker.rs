use super::{Command, EventCause, PresenceEvent, PresenceHandle, ServiceConfig};
use crate::monitor::StalenessMonitor;
use crate::presence::{PresenceEngine, Transition};
use crate::reading::RawReading;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Owns the presence engine and its staleness monitor on one task.
///
/// Readings from any task or thread arrive through `PresenceHandle` and are
/// processed strictly in order. Staleness timers report back over a separate
/// channel into the same loop, so state is only ever touched here.
pub struct PresenceService {
    engine: PresenceEngine,
    monitor: StalenessMonitor,
    silence_threshold: Duration,

    commands: mpsc::Receiver<Command>,
    expired_tx: mpsc::UnboundedSender<RawReading>,
    expired_rx: mpsc::UnboundedReceiver<RawReading>,
    events_tx: broadcast::Sender<PresenceEvent>,
}

impl PresenceService {
    /// Start the service task. It runs until every handle is dropped.
    pub fn spawn(
        engine: PresenceEngine,
        config: &ServiceConfig,
    ) -> (PresenceHandle, JoinHandle<()>) {
        let (commands_tx, commands) = mpsc::channel(config.queue_capacity.max(1));
        let (events_tx, _) = broadcast::channel(config.event_capacity.max(1));
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();

        let service = Self {
            silence_threshold: engine.config().silence_threshold(),
            engine,
            monitor: StalenessMonitor::new(),
            commands,
            expired_tx,
            expired_rx,
            events_tx: events_tx.clone(),
        };

        let handle = PresenceHandle::new(commands_tx, events_tx);
        let task = tokio::spawn(service.run());
        (handle, task)
    }

    async fn run(mut self) {
        info!(
            registrations = self.engine.table().len(),
            noise_threshold_ms = self.engine.config().noise_threshold_ms,
            silence_threshold_secs = self.silence_threshold.as_secs(),
            "Presence service started"
        );

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => break,
                    }
                }

                Some(reading) = self.expired_rx.recv() => {
                    let transition = self.engine.expire(&reading);
                    self.apply(EventCause::Stale, transition);
                }
            }
        }

        self.monitor.cancel();
        info!("Presence service stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Reading(reading) => {
                let transition = self.engine.ingest(reading);
                self.apply(EventCause::Reading, transition);
            }
            Command::Reset => {
                let transition = self.engine.reset();
                // Nothing was present, but a pending timer must still go
                self.monitor.cancel();
                self.apply(EventCause::Reset, transition);
            }
            Command::Current(reply) => {
                let _ = reply.send(self.engine.current().cloned());
            }
        }
    }

    /// Re-arm or cancel the staleness timer, then publish
    fn apply(&mut self, cause: EventCause, transition: Transition) {
        if transition.is_unchanged() {
            return;
        }

        match &transition {
            Transition::Unchanged => {}
            Transition::Departed => self.monitor.cancel(),
            Transition::Detected(detection) => {
                let expired_tx = self.expired_tx.clone();
                self.monitor.arm(
                    detection.reading.clone(),
                    self.silence_threshold,
                    move |reading| {
                        let _ = expired_tx.send(reading);
                    },
                );
            }
        }

        debug!(
            cause = ?cause,
            classification = ?transition.classification(),
            "Publishing presence event"
        );
        if self
            .events_tx
            .send(PresenceEvent::new(cause, transition))
            .is_err()
        {
            debug!("No presence subscribers, event dropped");
        }
    }
}
