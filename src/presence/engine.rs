use crate::presence::config::PresenceConfig;
use crate::presence::transition::{Classification, Detection, Transition};
use crate::reading::{Identifier, RawReading};
use crate::registration::{Registration, RegistrationTable};
use serde::Serialize;
use tracing::{debug, info};

/// The tag currently considered present
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PresenceState {
    pub tag: Identifier,

    /// Latest reading for `tag`; the staleness timer is keyed on this value
    pub reading: RawReading,

    /// Number of distinct passes, starting at 1
    pub pass_count: u32,

    /// Timestamp of the latest reading, refreshed on every reading of `tag`
    pub round_start_ms: u32,

    pub registration: Registration,
}

impl PresenceState {
    fn detection(&self, classification: Classification) -> Detection {
        Detection {
            classification,
            registration: self.registration.clone(),
            pass_count: self.pass_count,
            reading: self.reading.clone(),
            round_start_ms: self.round_start_ms,
        }
    }
}

/// Presence state machine.
///
/// Single-writer: every call must come from the one context that owns the
/// engine (see `PresenceService`). The engine never schedules timers itself;
/// callers arm the staleness monitor from `Transition::watched_reading`.
pub struct PresenceEngine {
    table: RegistrationTable,
    config: PresenceConfig,

    /// Tag in range, if any
    state: Option<PresenceState>,

    /// Last reading accepted by `ingest`, used to drop redeliveries
    last_reading: Option<RawReading>,
}

impl PresenceEngine {
    pub fn new(table: RegistrationTable, config: PresenceConfig) -> Self {
        Self {
            table,
            config,
            state: None,
            last_reading: None,
        }
    }

    /// Process a single reading and classify the transition.
    ///
    /// Same-tag gaps are computed as `timestamp_ms.wrapping_sub(round_start_ms)`,
    /// so a reader clock wrapping past `u32::MAX` still yields the true gap.
    /// A clock that steps backwards yields a very large gap and is therefore
    /// classified as a repeated round.
    pub fn ingest(&mut self, reading: RawReading) -> Transition {
        // Redelivery of the value we already processed
        if self.last_reading.as_ref() == Some(&reading) {
            debug!(reading = %reading, "Duplicate reading ignored");
            return Transition::Unchanged;
        }
        self.last_reading = Some(reading.clone());

        let tag = match &reading.tag {
            Some(tag) => tag.clone(),
            None => {
                self.clear("absent");
                return Transition::Departed;
            }
        };

        let noise_threshold_ms = self.config.noise_threshold_ms;
        if let Some(state) = self.state.as_mut().filter(|s| s.tag == tag) {
            let delta = reading.timestamp_ms.wrapping_sub(state.round_start_ms);
            let classification = if delta > noise_threshold_ms {
                state.pass_count = state.pass_count.saturating_add(1);
                Classification::RepeatedRound
            } else {
                Classification::ContinuedDwell
            };
            state.round_start_ms = reading.timestamp_ms;
            state.reading = reading;

            debug!(
                tag = %state.tag,
                delta_ms = delta,
                pass_count = state.pass_count,
                classification = ?classification,
                "Tag still present"
            );
            if classification == Classification::RepeatedRound {
                info!(
                    tag = %state.tag,
                    name = %state.registration.name,
                    pass_count = state.pass_count,
                    "Tag passed again"
                );
            }
            return Transition::Detected(state.detection(classification));
        }

        let registration = self.table.lookup(&tag).clone();
        info!(
            tag = %tag,
            name = %registration.name,
            registered = !registration.is_fallback(),
            "Tag arrived"
        );
        let state = PresenceState {
            tag,
            round_start_ms: reading.timestamp_ms,
            reading,
            pass_count: 1,
            registration,
        };
        let detection = state.detection(Classification::NewArrival);
        self.state = Some(state);
        Transition::Detected(detection)
    }

    /// Staleness timeout for `reading`.
    ///
    /// Departs only if the present tag's latest reading is still `reading`;
    /// a timer for a superseded reading is a silent no-op.
    pub fn expire(&mut self, reading: &RawReading) -> Transition {
        match &self.state {
            Some(state) if state.reading == *reading => {
                self.clear("stale");
                Transition::Departed
            }
            _ => {
                debug!(reading = %reading, "Superseded staleness timeout ignored");
                Transition::Unchanged
            }
        }
    }

    /// Forget everything, including the last processed reading.
    ///
    /// Used when the reader connection drops; returns `Departed` if a tag was
    /// present.
    pub fn reset(&mut self) -> Transition {
        self.last_reading = None;
        if self.state.is_some() {
            self.clear("reset");
            Transition::Departed
        } else {
            Transition::Unchanged
        }
    }

    pub fn current(&self) -> Option<&PresenceState> {
        self.state.as_ref()
    }

    pub fn last_reading(&self) -> Option<&RawReading> {
        self.last_reading.as_ref()
    }

    pub fn config(&self) -> &PresenceConfig {
        &self.config
    }

    pub fn table(&self) -> &RegistrationTable {
        &self.table
    }

    fn clear(&mut self, reason: &'static str) {
        if let Some(state) = self.state.take() {
            info!(
                tag = %state.tag,
                name = %state.registration.name,
                pass_count = state.pass_count,
                reason,
                "Tag departed"
            );
        }
    }
}
