//! Relay power-switch core.
//!
//! The relay is driven through a PWM output pinned at the two duty-cycle
//! extremes: 100 when the relay is on, 0 when it is off. `is_relay_on` is
//! the source of truth and `duty_cycle` always mirrors it — the pair is
//! updated together before any hardware call, so an observer never sees
//! them disagree.

use log::debug;

use crate::app::ports::PwmPort;
use crate::error::Result;

/// Duty cycle driven while the relay is on.
pub const DUTY_ON: u8 = 100;
/// Duty cycle driven while the relay is off.
pub const DUTY_OFF: u8 = 0;

/// Boolean relay state mapped onto a PWM output.
pub struct RelayController<P> {
    is_relay_on: bool,
    duty_cycle: u8,
    /// PWM output handle. `None` until the resolved output is attached;
    /// state changes before that are recorded without a hardware call.
    pwm: Option<P>,
}

impl<P: PwmPort> RelayController<P> {
    /// Construct with the initial requested state. The output is detached;
    /// call [`attach`](Self::attach) with the resolved PWM handle next.
    pub fn new(start_on: bool) -> Self {
        Self {
            is_relay_on: start_on,
            duty_cycle: if start_on { DUTY_ON } else { DUTY_OFF },
            pwm: None,
        }
    }

    /// Bind the resolved PWM output. Exclusive ownership is the output's
    /// concern and was already acquired when the handle was constructed.
    pub fn attach(&mut self, pwm: P) {
        self.pwm = Some(pwm);
    }

    /// Begin PWM signal generation at the current duty cycle.
    ///
    /// Called once on the initializing→ready transition. Not re-entry
    /// guarded — calling it twice is a caller error.
    pub fn initialize(&mut self) -> Result<()> {
        debug!(
            "starting relay {}",
            if self.is_relay_on { "ON" } else { "OFF" }
        );
        if let Some(pwm) = self.pwm.as_mut() {
            pwm.start(self.duty_cycle)?;
        }
        Ok(())
    }

    /// Set the logical relay state.
    ///
    /// A request matching the current state is a no-op with zero hardware
    /// calls. Otherwise the state pair is updated together and the new duty
    /// cycle is forwarded to the output if one is attached.
    pub fn set_relay(&mut self, on: bool) -> Result<()> {
        if on == self.is_relay_on {
            return Ok(());
        }

        self.duty_cycle = if on { DUTY_ON } else { DUTY_OFF };
        self.is_relay_on = on;

        if let Some(pwm) = self.pwm.as_mut() {
            pwm.set_duty_cycle(self.duty_cycle)?;
        }
        Ok(())
    }

    /// Stop signal generation and give the output back. The handle is
    /// consumed, so cleanup runs at most once; later calls are no-ops.
    pub fn release(&mut self) -> Result<()> {
        if let Some(mut pwm) = self.pwm.take() {
            pwm.cleanup()?;
        }
        Ok(())
    }

    /// Current logical relay state.
    pub fn is_relay_on(&self) -> bool {
        self.is_relay_on
    }

    /// Current duty cycle (always 0 or 100).
    pub fn duty_cycle(&self) -> u8 {
        self.duty_cycle
    }

    /// Whether a PWM output is currently attached.
    pub fn is_attached(&self) -> bool {
        self.pwm.is_some()
    }
}
