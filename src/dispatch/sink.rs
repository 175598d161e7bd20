use super::EffectSink;
use crate::registration::{ActuatorCommand, AudioCue, Symbol};
use tracing::{debug, info};

/// Sink that logs effects instead of performing them.
///
/// Used by the binary when no effector hardware is attached.
#[derive(Debug, Default)]
pub struct TracingSink {
    showing: Option<Symbol>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbol currently on the (virtual) display
    pub fn showing(&self) -> Option<&Symbol> {
        self.showing.as_ref()
    }
}

impl EffectSink for TracingSink {
    fn play(&mut self, cue: &AudioCue) {
        match cue {
            AudioCue::Asset(name) => info!(asset = %name, "Play sound"),
            AudioCue::System(id) => info!(system_sound = id, "Play sound"),
        }
    }

    fn show_symbol(&mut self, symbol: &Symbol) {
        info!(packed = ?symbol.packed(), "Show symbol");
        for row in symbol.rows() {
            debug!("{}", row);
        }
        self.showing = Some(*symbol);
    }

    fn clear_symbol(&mut self) {
        if self.showing.take().is_some() {
            info!("Clear symbol");
        }
    }

    fn actuate(&mut self, command: &ActuatorCommand) {
        info!(
            channel = command.channel,
            mode = ?command.mode,
            timeout_secs = command.timeout_secs,
            "Actuator command"
        );
    }
}
