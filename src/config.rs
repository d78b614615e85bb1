//! Job configuration parameters.
//!
//! All tunable parameters for the relay job. Values can be overridden via
//! the configuration file or the command line at startup.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Core relay job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Whether the relay should be switched on once the job reaches ready.
    pub start_on: bool,
    /// Logical PWM channel wired to the relay (1-based, board silkscreen).
    pub pwm_channel: u8,
    /// PWM base frequency in Hz. The output only ever sits at the duty
    /// extremes, but some PWM backends reject very low frequencies.
    pub pwm_hz: f64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            start_on: true,
            pwm_channel: 2,
            pwm_hz: pins::DEFAULT_PWM_HZ,
        }
    }
}

impl RelayConfig {
    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<()> {
        if pins::pin_for_channel(self.pwm_channel).is_none() {
            return Err(Error::Config("unknown PWM channel"));
        }
        if self.pwm_hz <= 0.0 || !self.pwm_hz.is_finite() {
            return Err(Error::Config("PWM frequency must be positive"));
        }
        Ok(())
    }

    /// The BCM pin the relay's PWM channel is wired to.
    pub fn relay_pin(&self) -> Result<u8> {
        pins::pin_for_channel(self.pwm_channel).ok_or(Error::Config("unknown PWM channel"))
    }
}

/// Identity labels attached to a job instance. Opaque to the relay logic;
/// they only show up in logs and published events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobIdentity {
    /// Bioreactor unit this job runs on.
    pub unit: String,
    /// Experiment the unit is currently assigned to.
    pub experiment: String,
}

impl JobIdentity {
    pub fn new(unit: impl Into<String>, experiment: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            experiment: experiment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = RelayConfig::default();
        assert!(c.start_on);
        assert!(c.validate().is_ok());
        assert!(c.relay_pin().is_ok());
        assert!(c.pwm_hz > 0.0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = RelayConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: RelayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.start_on, c2.start_on);
        assert_eq!(c.pwm_channel, c2.pwm_channel);
        assert!((c.pwm_hz - c2.pwm_hz).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let c: RelayConfig = serde_json::from_str(r#"{"start_on": false}"#).unwrap();
        assert!(!c.start_on);
        assert_eq!(c.pwm_channel, RelayConfig::default().pwm_channel);
    }

    #[test]
    fn unknown_channel_rejected() {
        let c = RelayConfig {
            pwm_channel: 9,
            ..RelayConfig::default()
        };
        assert_eq!(c.validate(), Err(Error::Config("unknown PWM channel")));
        assert!(c.relay_pin().is_err());
    }

    #[test]
    fn non_positive_frequency_rejected() {
        for hz in [0.0, -1.0, f64::NAN] {
            let c = RelayConfig {
                pwm_hz: hz,
                ..RelayConfig::default()
            };
            assert!(c.validate().is_err(), "hz={hz} must be rejected");
        }
    }
}
