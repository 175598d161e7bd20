use crate::presence::Transition;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// What made the engine transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCause {
    Reading,
    /// Silence threshold elapsed with no newer reading
    Stale,
    Reset,
}

/// Presence change broadcast to effect dispatchers
#[derive(Clone, Debug, Serialize)]
pub struct PresenceEvent {
    /// UUIDv7, time-ordered
    pub event_id: String,
    pub cause: EventCause,
    pub transition: Transition,
    pub observed_at: DateTime<Utc>,
}

impl PresenceEvent {
    pub fn new(cause: EventCause, transition: Transition) -> Self {
        Self {
            event_id: Uuid::now_v7().to_string(),
            cause,
            transition,
            observed_at: Utc::now(),
        }
    }
}
