//! Outbound application events.
//!
//! The [`RelayService`](super::service::RelayService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — log them, publish them to a broker,
//! update a UI.

use crate::fsm::StateId;

/// Structured events emitted by the relay core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEvent {
    /// The job has started (carries the initial lifecycle state).
    Started(StateId),

    /// The lifecycle machine transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The published `is_relay_on` setting changed.
    RelayChanged { is_on: bool, duty_cycle: u8 },

    /// The PWM output was cleaned up and released.
    OutputReleased,
}

/// A point-in-time snapshot of the job, suitable for logging or queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStatus {
    pub state: StateId,
    pub is_relay_on: bool,
    pub duty_cycle: u8,
}
