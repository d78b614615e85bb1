//! PWM output adapter — claims a GPIO pin exclusively and exposes it
//! through [`PwmPort`].
//!
//! Ownership is process-wide: a claim registry guards against two owners
//! driving the same pin, satisfying the exclusive acquire/release contract
//! of the port. Claims are released by `cleanup` (or on drop, should the
//! owner disappear without cleaning up).

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

use log::info;

use crate::app::ports::PwmPort;
use crate::drivers::soft_pwm::SoftPwmDriver;
use crate::error::{Error, Result};

fn claimed_pins() -> &'static Mutex<HashSet<u8>> {
    static CLAIMED: OnceLock<Mutex<HashSet<u8>>> = OnceLock::new();
    CLAIMED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Exclusively owned software-PWM output on one GPIO pin.
pub struct SoftPwmOutput {
    driver: SoftPwmDriver,
    claimed: bool,
}

impl SoftPwmOutput {
    /// Claim exclusive ownership of `pin` and bind a software PWM driver
    /// to it. Fails with [`Error::ResourceBusy`] when the pin is already
    /// claimed.
    pub fn claim(pin: u8, hz: f64) -> Result<Self> {
        {
            let mut claimed = claimed_pins()
                .lock()
                .map_err(|_| Error::HardwareFault("PWM claim registry poisoned"))?;
            if !claimed.insert(pin) {
                return Err(Error::ResourceBusy);
            }
        }

        match SoftPwmDriver::bind(pin, hz) {
            Ok(driver) => {
                info!("claimed PWM output on GPIO {pin} at {hz} Hz");
                Ok(Self {
                    driver,
                    claimed: true,
                })
            }
            Err(e) => {
                release_pin(pin);
                Err(e)
            }
        }
    }

    fn release_claim(&mut self) {
        if self.claimed {
            release_pin(self.driver.pin_number());
            self.claimed = false;
        }
    }
}

fn release_pin(pin: u8) {
    if let Ok(mut claimed) = claimed_pins().lock() {
        claimed.remove(&pin);
    }
}

impl PwmPort for SoftPwmOutput {
    fn start(&mut self, duty_cycle: u8) -> Result<()> {
        self.driver.start(duty_cycle)
    }

    fn set_duty_cycle(&mut self, duty_cycle: u8) -> Result<()> {
        self.driver.set_duty(duty_cycle)
    }

    fn cleanup(&mut self) -> Result<()> {
        self.driver.stop()?;
        self.release_claim();
        info!("released PWM output on GPIO {}", self.driver.pin_number());
        Ok(())
    }
}

impl Drop for SoftPwmOutput {
    fn drop(&mut self) {
        self.release_claim();
    }
}
