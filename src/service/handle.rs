use super::{Command, PresenceEvent};
use crate::presence::PresenceState;
use crate::reading::RawReading;
use anyhow::{anyhow, Context, Result};
use tokio::sync::{broadcast, mpsc, oneshot};

/// Cloneable entry point into a running `PresenceService`
#[derive(Clone)]
pub struct PresenceHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<PresenceEvent>,
}

impl PresenceHandle {
    pub(super) fn new(
        commands: mpsc::Sender<Command>,
        events: broadcast::Sender<PresenceEvent>,
    ) -> Self {
        Self { commands, events }
    }

    /// Queue a reading for the engine. Waits if the queue is full.
    pub async fn submit(&self, reading: RawReading) -> Result<()> {
        self.commands
            .send(Command::Reading(reading))
            .await
            .map_err(|_| anyhow!("presence service stopped"))
    }

    /// Queue a reading from a thread outside the runtime (e.g. a reader
    /// driver callback). Must not be called from async code.
    pub fn submit_blocking(&self, reading: RawReading) -> Result<()> {
        self.commands
            .blocking_send(Command::Reading(reading))
            .map_err(|_| anyhow!("presence service stopped"))
    }

    /// Drop all presence state, as when the reader disconnects
    pub async fn reset(&self) -> Result<()> {
        self.commands
            .send(Command::Reset)
            .await
            .map_err(|_| anyhow!("presence service stopped"))
    }

    /// Snapshot of the tag currently present
    pub async fn current(&self) -> Result<Option<PresenceState>> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(Command::Current(tx))
            .await
            .map_err(|_| anyhow!("presence service stopped"))?;
        rx.await.context("presence service dropped state request")
    }

    /// Subscribe to presence events
    pub fn subscribe(&self) -> broadcast::Receiver<PresenceEvent> {
        self.events.subscribe()
    }
}
