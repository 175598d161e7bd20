use serde::{Deserialize, Serialize};

/// Channel sizing for the presence service
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Readings buffered ahead of the engine before `submit` waits
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Events retained for slow subscribers before they lag
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_queue_capacity() -> usize {
    256
}

fn default_event_capacity() -> usize {
    100
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            event_capacity: default_event_capacity(),
        }
    }
}
