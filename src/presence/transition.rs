use crate::reading::RawReading;
use crate::registration::Registration;
use serde::Serialize;

/// How a present-tag reading relates to the previous state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// First reading of a tag (nothing present, or a different tag was)
    NewArrival,
    /// Same tag, read again within the noise threshold
    ContinuedDwell,
    /// Same tag, read again after a gap longer than the noise threshold
    RepeatedRound,
}

/// Fully described detection handed to effect dispatch
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Detection {
    pub classification: Classification,
    pub registration: Registration,
    pub pass_count: u32,
    pub reading: RawReading,
    pub round_start_ms: u32,
}

/// Result of feeding one reading (or a stale timeout) to the engine
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Duplicate delivery or superseded timeout; nothing changed
    Unchanged,
    /// No tag is present any more
    Departed,
    Detected(Detection),
}

impl Transition {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Transition::Unchanged)
    }

    pub fn classification(&self) -> Option<Classification> {
        match self {
            Transition::Detected(d) => Some(d.classification),
            _ => None,
        }
    }

    /// Reading the staleness timer should watch after this transition
    pub fn watched_reading(&self) -> Option<&RawReading> {
        match self {
            Transition::Detected(d) => Some(&d.reading),
            _ => None,
        }
    }
}
