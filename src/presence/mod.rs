// Presence engine: turns raw tag readings into presence transitions

mod config;
mod engine;
mod transition;

pub use config::PresenceConfig;
pub use engine::{PresenceEngine, PresenceState};
pub use transition::{Classification, Detection, Transition};

#[cfg(test)]
mod tests;
