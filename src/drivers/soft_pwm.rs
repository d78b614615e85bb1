//! Software PWM driver for a single GPIO pin.
//!
//! ## Dual-target design
//!
//! With the `raspi` feature: drives the pin through rppal's software PWM
//! (`set_pwm_frequency` / `clear_pwm`).
//! Without it (host/test builds): tracks duty and running state in-memory
//! only.
//!
//! Duty changes before `start` are latched, not driven — the latched value
//! is what generation begins with.

use log::debug;

use crate::error::Result;

#[cfg(feature = "raspi")]
use crate::error::Error;

/// Software PWM on one GPIO pin.
pub struct SoftPwmDriver {
    pin_number: u8,
    hz: f64,
    duty: u8,
    running: bool,
    #[cfg(feature = "raspi")]
    pin: rppal::gpio::OutputPin,
}

impl SoftPwmDriver {
    /// Bind the driver to a GPIO pin. Does not start signal generation.
    #[cfg(feature = "raspi")]
    pub fn bind(pin_number: u8, hz: f64) -> Result<Self> {
        let gpio = rppal::gpio::Gpio::new().map_err(map_gpio_error)?;
        let pin = gpio.get(pin_number).map_err(map_gpio_error)?.into_output_low();
        Ok(Self {
            pin_number,
            hz,
            duty: 0,
            running: false,
            pin,
        })
    }

    /// Bind the driver to a GPIO pin. Does not start signal generation.
    #[cfg(not(feature = "raspi"))]
    pub fn bind(pin_number: u8, hz: f64) -> Result<Self> {
        Ok(Self {
            pin_number,
            hz,
            duty: 0,
            running: false,
        })
    }

    /// Begin signal generation at the given duty cycle (0–100).
    pub fn start(&mut self, duty: u8) -> Result<()> {
        self.duty = duty.min(100);
        self.running = true;
        self.apply()
    }

    /// Change the duty cycle. Latched when generation has not started yet.
    pub fn set_duty(&mut self, duty: u8) -> Result<()> {
        self.duty = duty.min(100);
        if self.running {
            self.apply()
        } else {
            Ok(())
        }
    }

    /// Stop signal generation and drive the pin low.
    pub fn stop(&mut self) -> Result<()> {
        self.running = false;
        #[cfg(feature = "raspi")]
        {
            self.pin
                .clear_pwm()
                .map_err(|_| Error::HardwareFault("PWM teardown failed"))?;
            self.pin.set_low();
        }
        debug!("pwm pin {}: stopped", self.pin_number);
        Ok(())
    }

    /// The BCM pin this driver is bound to.
    pub fn pin_number(&self) -> u8 {
        self.pin_number
    }

    /// Latched duty cycle (0–100).
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Whether signal generation is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn apply(&mut self) -> Result<()> {
        debug!(
            "pwm pin {}: {}% at {} Hz",
            self.pin_number, self.duty, self.hz
        );
        #[cfg(feature = "raspi")]
        self.pin
            .set_pwm_frequency(self.hz, f64::from(self.duty) / 100.0)
            .map_err(|_| Error::HardwareFault("PWM frequency update failed"))?;
        Ok(())
    }
}

#[cfg(feature = "raspi")]
fn map_gpio_error(e: rppal::gpio::Error) -> Error {
    log::error!("gpio error: {e}");
    match e {
        rppal::gpio::Error::PinNotAvailable(_) => Error::ResourceBusy,
        _ => Error::HardwareFault("GPIO unavailable"),
    }
}
