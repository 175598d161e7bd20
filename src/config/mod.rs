pub mod registry;
pub mod runtime;
pub use registry::{RegistrationRecord, RegistryConfig};
pub use runtime::{apply_env_overrides, apply_overrides};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// Re-export config types owned by their components
pub use crate::presence::PresenceConfig;
pub use crate::service::ServiceConfig;

/// Complete dwell configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DwellConfig {
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Load configuration from TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<DwellConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: DwellConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}
