// Tag registrations and lookup table

mod symbol;
mod table;

pub use symbol::{Symbol, SymbolError, SYMBOL_COLUMNS, SYMBOL_ROWS};
pub use table::{RegistrationError, RegistrationTable};

use crate::reading::Identifier;
use serde::{Deserialize, Serialize};

/// Platform tone played while a tag keeps dwelling on the reader
pub const CLICK_TONE: AudioCue = AudioCue::System(1306);

/// Descriptive metadata for a registered tag
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Registration {
    /// `None` only for the table's fallback registration
    pub identifier: Option<Identifier>,
    pub name: String,
    pub audio_cue: Option<AudioCue>,
    pub symbol: Option<Symbol>,
    pub actuator: Option<ActuatorCommand>,
}

impl Registration {
    /// Registration used for tags that are not in the table
    pub fn unknown() -> Self {
        Self {
            identifier: None,
            name: "Unknown".to_string(),
            audio_cue: None,
            symbol: Some(Symbol::placeholder()),
            actuator: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.identifier.is_none()
    }
}

/// Sound to play for a transition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    /// Bundled sound file, by asset name (e.g. "TrainHorn")
    Asset(String),
    /// Platform system sound id
    System(u32),
}

/// Output mode of an infrared Power Functions receiver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorMode {
    #[default]
    Single,
    Combo,
}

/// Command sent to the motor/lighting actuator bound to a tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Receiver channel, 1..=4
    pub channel: u8,
    #[serde(default)]
    pub mode: ActuatorMode,
    /// Seconds before the actuator is released, 0 holds until cleared
    #[serde(default)]
    pub timeout_secs: u64,
}

impl ActuatorCommand {
    pub const CHANNELS: std::ops::RangeInclusive<u8> = 1..=4;

    pub fn new(channel: u8) -> Self {
        Self {
            channel,
            mode: ActuatorMode::Single,
            timeout_secs: 0,
        }
    }
}
