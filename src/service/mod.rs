// Presence service: single-writer task owning the engine and its timer

mod config;
mod event;
mod feed;
mod handle;
mod worker;

pub use config::ServiceConfig;
pub use event::{EventCause, PresenceEvent};
pub use feed::{feed_lines, FeedEnd};
pub use handle::PresenceHandle;
pub use worker::PresenceService;

use crate::presence::PresenceState;
use crate::reading::RawReading;
use tokio::sync::oneshot;

/// Work items serialized onto the service task
#[derive(Debug)]
pub(crate) enum Command {
    Reading(RawReading),
    Reset,
    Current(oneshot::Sender<Option<PresenceState>>),
}
