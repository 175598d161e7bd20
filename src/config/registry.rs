use crate::reading::Identifier;
use crate::registration::{ActuatorCommand, AudioCue, Registration, RegistrationError, Symbol};
use serde::Deserialize;

/// `[registry]` section: the fallback plus one record per known tag
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub fallback: RegistrationRecord,
    #[serde(default)]
    pub registrations: Vec<RegistrationRecord>,
}

/// A registration as written in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRecord {
    /// Tag identifier bytes. Ignored for the fallback record.
    #[serde(default)]
    pub id: Vec<u8>,
    pub name: String,
    #[serde(default)]
    pub audio_cue: Option<AudioCue>,
    #[serde(default)]
    pub symbol: Option<Symbol>,
    #[serde(default)]
    pub actuator: Option<ActuatorCommand>,
}

impl RegistrationRecord {
    pub fn to_registration(&self) -> Result<Registration, RegistrationError> {
        let identifier = Identifier::new(self.id.clone()).ok_or_else(|| {
            RegistrationError::InvalidIdentifier {
                name: self.name.clone(),
            }
        })?;
        Ok(Registration {
            identifier: Some(identifier),
            ..self.to_fallback()
        })
    }

    pub fn to_fallback(&self) -> Registration {
        Registration {
            identifier: None,
            name: self.name.clone(),
            audio_cue: self.audio_cue.clone(),
            symbol: self.symbol,
            actuator: self.actuator,
        }
    }
}

impl Default for RegistrationRecord {
    fn default() -> Self {
        let unknown = Registration::unknown();
        Self {
            id: Vec::new(),
            name: unknown.name,
            audio_cue: unknown.audio_cue,
            symbol: unknown.symbol,
            actuator: unknown.actuator,
        }
    }
}
