//! Unified error types for the relay job.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! entry point's error handling uniform. All variants are `Copy` so they
//! can pass through the state machine without allocation.

use std::fmt;

// ---------------------------------------------------------------------------
// Top-level job error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The PWM output is already owned elsewhere. Fatal to startup.
    ResourceBusy,
    /// Underlying PWM signal generation failed. Propagated, never retried.
    HardwareFault(&'static str),
    /// Configuration is invalid or could not be resolved.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceBusy => write!(f, "PWM output already in use"),
            Self::HardwareFault(msg) => write!(f, "hardware fault: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(Error::ResourceBusy.to_string(), "PWM output already in use");
        assert_eq!(
            Error::HardwareFault("PWM frequency update failed").to_string(),
            "hardware fault: PWM frequency update failed"
        );
        assert_eq!(
            Error::Config("unknown PWM channel").to_string(),
            "config: unknown PWM channel"
        );
    }
}
