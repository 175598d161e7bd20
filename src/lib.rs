// Tag readings and identifiers
pub mod reading;

// Registration metadata and lookup table
pub mod registration;

// Presence state machine
pub mod presence;

// Staleness (silent departure) timer
pub mod monitor;

// Single-writer service task and event broadcast
pub mod service;

// Effect planning and dispatch
pub mod dispatch;

// Configuration loading
pub mod config;

pub use presence::{Classification, Detection, PresenceEngine, Transition};
pub use reading::{Identifier, RawReading};
pub use registration::{Registration, RegistrationTable};
pub use service::{PresenceEvent, PresenceHandle, PresenceService};
