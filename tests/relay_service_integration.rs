//! Integration tests: RelayService → lifecycle FSM → PWM output.

use std::cell::RefCell;
use std::rc::Rc;

use biorelay::app::commands::RelayCommand;
use biorelay::app::events::RelayEvent;
use biorelay::app::ports::{EventSink, PwmPort};
use biorelay::app::service::RelayService;
use biorelay::config::{JobIdentity, RelayConfig};
use biorelay::error::Result;
use biorelay::fsm::StateId;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PwmCall {
    Start(u8),
    SetDuty(u8),
    Cleanup,
}

#[derive(Clone, Default)]
struct CallLog(Rc<RefCell<Vec<PwmCall>>>);

impl CallLog {
    fn calls(&self) -> Vec<PwmCall> {
        self.0.borrow().clone()
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

struct MockPwm {
    log: CallLog,
}

impl PwmPort for MockPwm {
    fn start(&mut self, duty_cycle: u8) -> Result<()> {
        self.log.0.borrow_mut().push(PwmCall::Start(duty_cycle));
        Ok(())
    }
    fn set_duty_cycle(&mut self, duty_cycle: u8) -> Result<()> {
        self.log.0.borrow_mut().push(PwmCall::SetDuty(duty_cycle));
        Ok(())
    }
    fn cleanup(&mut self) -> Result<()> {
        self.log.0.borrow_mut().push(PwmCall::Cleanup);
        Ok(())
    }
}

#[derive(Default)]
struct SinkSpy {
    events: Vec<RelayEvent>,
}

impl EventSink for SinkSpy {
    fn emit(&mut self, event: &RelayEvent) {
        self.events.push(*event);
    }
}

fn make_service(start_on: bool) -> (RelayService<MockPwm>, CallLog) {
    let log = CallLog::default();
    let config = RelayConfig {
        start_on,
        ..RelayConfig::default()
    };
    let service = RelayService::new(
        config,
        JobIdentity::new("unit-03", "yeast-batch-9"),
        MockPwm { log: log.clone() },
    );
    (service, log)
}

fn ready_service(start_on: bool) -> (RelayService<MockPwm>, CallLog, SinkSpy) {
    let (mut service, log) = make_service(start_on);
    let mut sink = SinkSpy::default();
    service.initialize(&mut sink).unwrap();
    log.clear();
    sink.events.clear();
    (service, log, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn initialize_starts_pwm_at_on_duty() {
    let (mut service, log) = make_service(true);
    let mut sink = SinkSpy::default();
    service.initialize(&mut sink).unwrap();

    assert_eq!(service.state(), StateId::Ready);
    assert!(service.is_relay_on());
    assert_eq!(service.duty_cycle(), 100);
    // Exactly one start call, no duty writes.
    assert_eq!(log.calls(), vec![PwmCall::Start(100)]);
}

#[test]
fn initialize_starts_pwm_at_off_duty() {
    let (mut service, log) = make_service(false);
    let mut sink = SinkSpy::default();
    service.initialize(&mut sink).unwrap();

    assert!(!service.is_relay_on());
    assert_eq!(service.duty_cycle(), 0);
    assert_eq!(log.calls(), vec![PwmCall::Start(0)]);
}

#[test]
fn initialize_publishes_startup_events() {
    let (mut service, _log) = make_service(true);
    let mut sink = SinkSpy::default();
    service.initialize(&mut sink).unwrap();

    assert_eq!(sink.events[0], RelayEvent::Started(StateId::Initializing));
    assert!(sink.events.contains(&RelayEvent::StateChanged {
        from: StateId::Initializing,
        to: StateId::Ready,
    }));
}

// ── Measurement bracket ───────────────────────────────────────

#[test]
fn od_bracket_forces_off_then_on() {
    let (mut service, log, mut sink) = ready_service(true);

    service.od_reading_starting(&mut sink).unwrap();
    assert!(!service.is_relay_on());
    assert_eq!(service.duty_cycle(), 0);

    service.od_reading_finished(&mut sink).unwrap();
    assert!(service.is_relay_on());
    assert_eq!(service.duty_cycle(), 100);

    assert_eq!(log.calls(), vec![PwmCall::SetDuty(0), PwmCall::SetDuty(100)]);
}

#[test]
fn od_bracket_restore_is_unconditional() {
    // Relay manually switched off before the reading: the bracket exit
    // still turns it on. This is restore-to-on, not a save/restore of the
    // pre-bracket value.
    let (mut service, log, mut sink) = ready_service(true);
    service
        .handle_command(RelayCommand::SetRelay(false), &mut sink)
        .unwrap();
    log.clear();

    service.od_reading_starting(&mut sink).unwrap();
    // Already off — no hardware write.
    assert_eq!(log.calls(), vec![]);

    service.od_reading_finished(&mut sink).unwrap();
    assert!(service.is_relay_on());
    assert_eq!(log.calls(), vec![PwmCall::SetDuty(100)]);
}

// ── Sleep / wake ──────────────────────────────────────────────

#[test]
fn sleep_turns_relay_off_and_wake_turns_it_on() {
    let (mut service, log, mut sink) = ready_service(true);

    service.on_sleeping(&mut sink).unwrap();
    assert_eq!(service.state(), StateId::Sleeping);
    assert!(!service.is_relay_on());

    service.on_ready(&mut sink).unwrap();
    assert_eq!(service.state(), StateId::Ready);
    assert!(service.is_relay_on());

    assert_eq!(log.calls(), vec![PwmCall::SetDuty(0), PwmCall::SetDuty(100)]);
}

#[test]
fn wake_restore_is_unconditional() {
    // Relay off before sleeping; waking still requests on.
    let (mut service, _log, mut sink) = ready_service(false);

    service.on_sleeping(&mut sink).unwrap();
    service.on_ready(&mut sink).unwrap();
    assert!(service.is_relay_on());
}

// ── Disconnect ────────────────────────────────────────────────

#[test]
fn disconnect_forces_off_and_cleans_up_once() {
    let (mut service, log, mut sink) = ready_service(true);

    service.on_disconnected(&mut sink).unwrap();
    assert_eq!(service.state(), StateId::Disconnected);
    assert!(!service.is_relay_on());
    assert_eq!(log.calls(), vec![PwmCall::SetDuty(0), PwmCall::Cleanup]);
    assert!(sink.events.contains(&RelayEvent::OutputReleased));

    // A second disconnect must not touch the hardware again.
    log.clear();
    service.on_disconnected(&mut sink).unwrap();
    assert_eq!(log.calls(), vec![]);
}

#[test]
fn disconnect_from_sleep_stays_off() {
    let (mut service, log, mut sink) = ready_service(true);

    service.on_sleeping(&mut sink).unwrap();
    log.clear();
    service.on_disconnected(&mut sink).unwrap();

    assert!(!service.is_relay_on());
    // Already off from sleeping — only the cleanup reaches the output.
    assert_eq!(log.calls(), vec![PwmCall::Cleanup]);
}

#[test]
fn disconnected_ignores_further_lifecycle_events() {
    let (mut service, log, mut sink) = ready_service(true);
    service.on_disconnected(&mut sink).unwrap();
    log.clear();

    service.on_ready(&mut sink).unwrap();
    service.od_reading_finished(&mut sink).unwrap();
    assert_eq!(service.state(), StateId::Disconnected);
    assert!(!service.is_relay_on());
    assert_eq!(log.calls(), vec![]);
}

// ── Remote setting ────────────────────────────────────────────

#[test]
fn set_relay_command_toggles_and_publishes() {
    let (mut service, log, mut sink) = ready_service(true);

    service
        .handle_command(RelayCommand::SetRelay(false), &mut sink)
        .unwrap();
    assert!(!service.is_relay_on());
    assert_eq!(log.calls(), vec![PwmCall::SetDuty(0)]);
    assert_eq!(
        sink.events,
        vec![RelayEvent::RelayChanged {
            is_on: false,
            duty_cycle: 0,
        }]
    );
}

#[test]
fn redundant_set_relay_command_is_silent() {
    let (mut service, log, mut sink) = ready_service(true);

    service
        .handle_command(RelayCommand::SetRelay(true), &mut sink)
        .unwrap();
    assert_eq!(log.calls(), vec![]);
    assert_eq!(sink.events, vec![]);
}
