use super::{ActuatorCommand, Registration};
use crate::config::{RegistrationRecord, RegistryConfig};
use crate::reading::Identifier;
use std::collections::HashMap;
use std::fmt;
use tracing::info;

/// Configuration errors raised while building a registration table
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationError {
    DuplicateIdentifier(Identifier),
    /// Entry id is empty or all-zero, indistinguishable from "no tag present"
    InvalidIdentifier { name: String },
    InvalidChannel { name: String, channel: u8 },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::DuplicateIdentifier(id) => {
                write!(f, "identifier {} is registered more than once", id)
            }
            RegistrationError::InvalidIdentifier { name } => {
                write!(
                    f,
                    "registration '{}' has an empty or all-zero identifier",
                    name
                )
            }
            RegistrationError::InvalidChannel { name, channel } => {
                write!(
                    f,
                    "registration '{}' uses actuator channel {}, expected 1-4",
                    name, channel
                )
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

/// Immutable mapping from tag identifier to registration.
///
/// Lookups never fail: unknown identifiers resolve to the fallback
/// registration, which is held apart from the keyed entries.
#[derive(Clone, Debug)]
pub struct RegistrationTable {
    entries: HashMap<Identifier, Registration>,
    fallback: Registration,
}

impl RegistrationTable {
    /// Build the table. Each entry must carry a unique identifier.
    pub fn new(
        mut fallback: Registration,
        registrations: impl IntoIterator<Item = Registration>,
    ) -> Result<Self, RegistrationError> {
        fallback.identifier = None;
        validate_actuator(&fallback.name, fallback.actuator.as_ref())?;

        let mut entries = HashMap::new();
        for registration in registrations {
            let identifier = match &registration.identifier {
                Some(id) => id.clone(),
                None => {
                    return Err(RegistrationError::InvalidIdentifier {
                        name: registration.name,
                    })
                }
            };
            validate_actuator(&registration.name, registration.actuator.as_ref())?;

            if entries.contains_key(&identifier) {
                return Err(RegistrationError::DuplicateIdentifier(identifier));
            }
            entries.insert(identifier, registration);
        }

        Ok(Self { entries, fallback })
    }

    /// Build the table from the `[registry]` configuration section
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistrationError> {
        let fallback = config.fallback.to_fallback();
        let registrations = config
            .registrations
            .iter()
            .map(RegistrationRecord::to_registration)
            .collect::<Result<Vec<_>, _>>()?;

        let table = Self::new(fallback, registrations)?;
        info!(
            registrations = table.len(),
            fallback = %table.fallback.name,
            "Registration table loaded"
        );
        Ok(table)
    }

    /// Look up a tag, falling back to the unknown registration
    pub fn lookup(&self, identifier: &Identifier) -> &Registration {
        self.entries.get(identifier).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &Registration {
        &self.fallback
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RegistrationTable {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: Registration::unknown(),
        }
    }
}

fn validate_actuator(
    name: &str,
    actuator: Option<&ActuatorCommand>,
) -> Result<(), RegistrationError> {
    match actuator {
        Some(cmd) if !ActuatorCommand::CHANNELS.contains(&cmd.channel) => {
            Err(RegistrationError::InvalidChannel {
                name: name.to_string(),
                channel: cmd.channel,
            })
        }
        _ => Ok(()),
    }
}
