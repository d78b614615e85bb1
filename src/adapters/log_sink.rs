//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured relay events to the
//! process logger. A broker-publishing adapter would implement the same
//! trait.

use log::info;

use crate::app::events::RelayEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`RelayEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &RelayEvent) {
        match event {
            RelayEvent::Started(state) => {
                info!("START | initial_state={state:?}");
            }
            RelayEvent::StateChanged { from, to } => {
                info!("STATE | {from:?} -> {to:?}");
            }
            RelayEvent::RelayChanged { is_on, duty_cycle } => {
                info!("RELAY | is_relay_on={is_on} duty={duty_cycle}%");
            }
            RelayEvent::OutputReleased => {
                info!("PWM   | output released");
            }
        }
    }
}
