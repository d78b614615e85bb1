//! Port traits — the hexagonal boundary between the relay core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RelayService (domain)
//! ```
//!
//! Driven adapters (the PWM output, event sinks, configuration sources)
//! implement these traits. The [`RelayService`](super::service::RelayService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::app::events::RelayEvent;
use crate::config::RelayConfig;
use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// PWM output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the relay core drives its PWM output through this.
///
/// Implementations own the underlying output exclusively: constructing an
/// adapter claims the output (failing with [`Error::ResourceBusy`] when it
/// is already held) and [`cleanup`](Self::cleanup) releases it. Hardware
/// failures surface as [`Error::HardwareFault`] and are not retried.
///
/// [`Error::ResourceBusy`]: crate::error::Error::ResourceBusy
/// [`Error::HardwareFault`]: crate::error::Error::HardwareFault
pub trait PwmPort {
    /// Begin signal generation at the given duty cycle (0–100).
    fn start(&mut self, duty_cycle: u8) -> Result<()>;

    /// Change the duty cycle. Valid before `start` as well: the value is
    /// latched and used once generation begins.
    fn set_duty_cycle(&mut self, duty_cycle: u8) -> Result<()>;

    /// Stop signal generation and release the output.
    fn cleanup(&mut self) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / publication)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`RelayEvent`]s through this port. Adapters
/// decide where they go — the serial log here; a broker bridge would
/// implement the same trait. This is also how the published `is_relay_on`
/// setting reaches external observers.
pub trait EventSink {
    fn emit(&mut self, event: &RelayEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← external config)
// ───────────────────────────────────────────────────────────────

/// Resolves the job configuration from wherever the deployment keeps it.
///
/// Implementations MUST validate before returning — unknown PWM channels
/// or nonsense frequencies are rejected with [`Error::Config`], not
/// silently corrected.
///
/// [`Error::Config`]: crate::error::Error::Config
pub trait ConfigPort {
    /// Load the configuration. Returns [`RelayConfig::default()`] when no
    /// stored configuration exists.
    fn load(&self) -> Result<RelayConfig>;
}
