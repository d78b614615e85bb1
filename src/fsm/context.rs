//! Shared mutable context threaded through every state handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to. It carries the requested relay state, one-shot output
//! actions, and the job configuration. Think of it as the "blackboard" in
//! a blackboard architecture: handlers record what they want, the service
//! applies it to the hardware ports afterwards.

use crate::config::RelayConfig;

// ---------------------------------------------------------------------------
// Relay commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Requests that state handlers write to drive the relay output.
/// The service applies these through the PWM port after each dispatch.
#[derive(Debug, Clone, Copy)]
pub struct RelayCommands {
    /// Requested logical relay state (`true` = on, duty 100).
    pub relay_on: bool,
    /// One-shot: start PWM signal generation at the current duty cycle.
    pub start_output: bool,
    /// One-shot: stop signal generation and release the PWM output.
    pub release_output: bool,
}

impl RelayCommands {
    /// Initial command set for a job configured to start in `start_on`.
    pub fn for_start(start_on: bool) -> Self {
        Self {
            relay_on: start_on,
            start_output: false,
            release_output: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    /// Relay output requests. Applied by the service after each dispatch.
    pub commands: RelayCommands,
    /// Job configuration (tunable parameters).
    pub config: RelayConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        Self {
            commands: RelayCommands::for_start(config.start_on),
            config,
        }
    }
}
