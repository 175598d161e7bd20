// Effect dispatch: maps presence transitions onto audio, display and actuator effects

mod sink;

pub use sink::TracingSink;

use crate::presence::{Classification, Transition};
use crate::registration::{ActuatorCommand, AudioCue, Symbol, CLICK_TONE};
use crate::service::PresenceEvent;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// A single side effect requested by a transition
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Play(AudioCue),
    ShowSymbol(Symbol),
    ClearSymbol,
    Actuate(ActuatorCommand),
}

/// Receiver of effects (speaker, LED matrix, motor transmitter).
///
/// Implementations must not block; they are driven from the dispatch loop.
pub trait EffectSink: Send {
    fn play(&mut self, cue: &AudioCue);
    fn show_symbol(&mut self, symbol: &Symbol);
    fn clear_symbol(&mut self);
    fn actuate(&mut self, command: &ActuatorCommand);

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::Play(cue) => self.play(cue),
            Effect::ShowSymbol(symbol) => self.show_symbol(symbol),
            Effect::ClearSymbol => self.clear_symbol(),
            Effect::Actuate(command) => self.actuate(command),
        }
    }
}

impl<S: EffectSink + ?Sized> EffectSink for &mut S {
    fn play(&mut self, cue: &AudioCue) {
        (**self).play(cue)
    }

    fn show_symbol(&mut self, symbol: &Symbol) {
        (**self).show_symbol(symbol)
    }

    fn clear_symbol(&mut self) {
        (**self).clear_symbol()
    }

    fn actuate(&mut self, command: &ActuatorCommand) {
        (**self).actuate(command)
    }
}

/// Effects for one transition.
///
/// Arrivals and new rounds get the tag's own cue, symbol and actuator
/// command. A continued dwell only clicks. Departure clears the display.
pub fn plan_effects(transition: &Transition) -> Vec<Effect> {
    match transition {
        Transition::Unchanged => Vec::new(),
        Transition::Departed => vec![Effect::ClearSymbol],
        Transition::Detected(detection) => match detection.classification {
            Classification::ContinuedDwell => vec![Effect::Play(CLICK_TONE)],
            Classification::NewArrival | Classification::RepeatedRound => {
                let registration = &detection.registration;
                let mut effects = Vec::with_capacity(3);
                if let Some(cue) = &registration.audio_cue {
                    effects.push(Effect::Play(cue.clone()));
                }
                if let Some(symbol) = registration.symbol {
                    effects.push(Effect::ShowSymbol(symbol));
                }
                if let Some(command) = registration.actuator {
                    effects.push(Effect::Actuate(command));
                }
                effects
            }
        },
    }
}

/// Drive `sink` from presence events until the service shuts down
pub async fn run_dispatcher<S: EffectSink>(
    mut events: broadcast::Receiver<PresenceEvent>,
    mut sink: S,
) {
    info!("Effect dispatcher started");

    loop {
        match events.recv().await {
            Ok(event) => {
                for effect in plan_effects(&event.transition) {
                    sink.apply(&effect);
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped = skipped, "Effect dispatcher lagged, skipped events");
                // Display may be showing a departed tag
                sink.clear_symbol();
            }
            Err(broadcast::error::RecvError::Closed) => {
                info!("Presence event channel closed");
                break;
            }
        }
    }

    info!("Effect dispatcher stopped");
}
