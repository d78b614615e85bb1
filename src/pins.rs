//! PWM channel → GPIO pin assignments for the reactor control board.
//!
//! Single source of truth — consumers resolve a logical channel through this
//! module rather than hard-coding BCM pin numbers. Change a mapping here and
//! it propagates everywhere.

// ---------------------------------------------------------------------------
// PWM channels
// ---------------------------------------------------------------------------

/// Number of PWM channels brought out on the control board header.
pub const PWM_CHANNEL_COUNT: usize = 4;

/// BCM pin driven by each logical channel, indexed by `channel - 1`.
/// Channels are labelled 1–4 on the board silkscreen.
const PWM_TO_PIN: [u8; PWM_CHANNEL_COUNT] = [17, 13, 16, 12];

/// Resolve a logical PWM channel (1-based) to its BCM pin number.
/// Returns `None` for channels the board does not expose.
pub fn pin_for_channel(channel: u8) -> Option<u8> {
    match channel {
        1..=4 => Some(PWM_TO_PIN[usize::from(channel) - 1]),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Default software-PWM base frequency (Hz). The relay only ever sits at
/// the duty extremes, but some PWM backends reject very low frequencies.
pub const DEFAULT_PWM_HZ: f64 = 10.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_board_channels_resolve() {
        for ch in 1..=4 {
            assert!(pin_for_channel(ch).is_some(), "channel {ch} must resolve");
        }
    }

    #[test]
    fn unknown_channels_do_not_resolve() {
        assert_eq!(pin_for_channel(0), None);
        assert_eq!(pin_for_channel(5), None);
        assert_eq!(pin_for_channel(255), None);
    }

    #[test]
    fn channel_pins_are_distinct() {
        for a in 1..=4u8 {
            for b in (a + 1)..=4 {
                assert_ne!(
                    pin_for_channel(a),
                    pin_for_channel(b),
                    "channels {a} and {b} share a pin"
                );
            }
        }
    }
}
