use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing policy for the presence engine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Gap between readings of the same tag (ms) above which the tag is
    /// counted as passing again rather than still dwelling
    #[serde(default = "default_noise_threshold_ms")]
    pub noise_threshold_ms: u32,

    /// Seconds without any reading before a present tag is considered gone
    #[serde(default = "default_silence_threshold_secs")]
    pub silence_threshold_secs: u64,
}

fn default_noise_threshold_ms() -> u32 {
    3000
}

fn default_silence_threshold_secs() -> u64 {
    180
}

impl PresenceConfig {
    pub fn silence_threshold(&self) -> Duration {
        Duration::from_secs(self.silence_threshold_secs)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            noise_threshold_ms: default_noise_threshold_ms(),
            silence_threshold_secs: default_silence_threshold_secs(),
        }
    }
}
