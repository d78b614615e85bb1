//! Relay service — the hexagonal core.
//!
//! [`RelayService`] owns the lifecycle FSM, its context, and the
//! [`RelayController`]. It exposes a clean, hardware-agnostic API: the
//! host delivers lifecycle events and commands, the service dispatches
//! them through the state machine and applies the outcome to the PWM
//! output port.
//!
//! ```text
//!  LifecycleEvent ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  RelayCommand  ──▶  │       RelayService        │
//!                     │  FSM · RelayController    │ ──▶ PwmPort
//!                     └──────────────────────────┘
//! ```
//!
//! Every entry point is synchronous and completes before returning; there
//! is no queue between the host callback and the hardware call.

use log::info;

use crate::config::{JobIdentity, RelayConfig};
use crate::error::Result;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, LifecycleEvent, StateId};
use crate::relay::RelayController;

use super::commands::RelayCommand;
use super::events::{RelayEvent, RelayStatus};
use super::ports::{EventSink, PwmPort};

// ───────────────────────────────────────────────────────────────
// RelayService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrating the relay job.
pub struct RelayService<P: PwmPort> {
    fsm: Fsm,
    ctx: FsmContext,
    relay: RelayController<P>,
    identity: JobIdentity,
}

impl<P: PwmPort> RelayService<P> {
    /// Construct the service from configuration, identity labels, and a
    /// resolved PWM output whose exclusive ownership was already acquired.
    ///
    /// Does **not** start signal generation — call
    /// [`initialize`](Self::initialize) next.
    pub fn new(config: RelayConfig, identity: JobIdentity, pwm: P) -> Self {
        let mut relay = RelayController::new(config.start_on);
        relay.attach(pwm);

        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Initializing);

        Self {
            fsm,
            ctx,
            relay,
            identity,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring the job from initializing to ready. Starts PWM signal
    /// generation at the current duty cycle. Call exactly once.
    pub fn initialize(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.fsm.start(&mut self.ctx);
        sink.emit(&RelayEvent::Started(self.fsm.current_state()));
        info!(
            "relay job starting (unit={}, experiment={})",
            self.identity.unit, self.identity.experiment
        );
        self.handle_event(LifecycleEvent::Ready, sink)
    }

    /// Deliver one lifecycle event from the host, then apply whatever the
    /// state machine requested to the relay output.
    pub fn handle_event(
        &mut self,
        event: LifecycleEvent,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let prev = self.fsm.current_state();
        self.fsm.dispatch(event, &mut self.ctx);
        let next = self.fsm.current_state();

        if next != prev {
            sink.emit(&RelayEvent::StateChanged {
                from: prev,
                to: next,
            });
        }

        self.apply(sink)
    }

    // ── Host lifecycle hooks ──────────────────────────────────
    //
    // Named wrappers so a host runtime can wire its callback set
    // {on_ready, on_sleeping, on_disconnected, od brackets} directly.

    /// The host declares the job ready (first time, or waking from sleep).
    pub fn on_ready(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.handle_event(LifecycleEvent::Ready, sink)
    }

    /// The host puts the job to sleep; the relay is switched off.
    pub fn on_sleeping(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.handle_event(LifecycleEvent::Sleep, sink)
    }

    /// The host tears the job down; the relay is forced off and the PWM
    /// output is released.
    pub fn on_disconnected(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.handle_event(LifecycleEvent::Disconnect, sink)
    }

    /// An optical-density reading is about to start; the relay goes off so
    /// PWM switching noise cannot corrupt the measurement.
    pub fn od_reading_starting(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.handle_event(LifecycleEvent::OdReadingStarting, sink)
    }

    /// The optical-density reading finished; the relay goes back on
    /// (unconditionally — not a restore of the pre-reading value).
    pub fn od_reading_finished(&mut self, sink: &mut impl EventSink) -> Result<()> {
        self.handle_event(LifecycleEvent::OdReadingFinished, sink)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (remote setting write).
    pub fn handle_command(
        &mut self,
        cmd: RelayCommand,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            RelayCommand::SetRelay(on) => {
                self.ctx.commands.relay_on = on;
                self.apply(sink)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current lifecycle state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// The published `is_relay_on` setting.
    pub fn is_relay_on(&self) -> bool {
        self.relay.is_relay_on()
    }

    /// Current duty cycle (always 0 or 100).
    pub fn duty_cycle(&self) -> u8 {
        self.relay.duty_cycle()
    }

    /// Identity labels this job instance runs under.
    pub fn identity(&self) -> &JobIdentity {
        &self.identity
    }

    /// Build a status snapshot of the job.
    pub fn status(&self) -> RelayStatus {
        RelayStatus {
            state: self.fsm.current_state(),
            is_relay_on: self.relay.is_relay_on(),
            duty_cycle: self.relay.duty_cycle(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate context requests into relay/PWM calls. The relay's own
    /// no-op check keeps redundant requests away from the hardware.
    fn apply(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let was_on = self.relay.is_relay_on();
        self.relay.set_relay(self.ctx.commands.relay_on)?;

        if self.relay.is_relay_on() != was_on {
            sink.emit(&RelayEvent::RelayChanged {
                is_on: self.relay.is_relay_on(),
                duty_cycle: self.relay.duty_cycle(),
            });
        }

        if self.ctx.commands.start_output {
            self.ctx.commands.start_output = false;
            self.relay.initialize()?;
        }

        if self.ctx.commands.release_output {
            self.ctx.commands.release_output = false;
            self.relay.release()?;
            sink.emit(&RelayEvent::OutputReleased);
        }

        Ok(())
    }
}
