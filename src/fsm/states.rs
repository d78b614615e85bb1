//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  INITIALIZING ──[ready]──▶ READY ──[sleep]──▶ SLEEPING
//!                              ▲                    │
//!                              └──────[ready]───────┘
//!
//!  Any state ──[disconnect]──▶ DISCONNECTED (terminal)
//! ```
//!
//! Optical-density reading brackets never change the lifecycle state: the
//! relay is requested off when a reading starts and unconditionally back on
//! when it finishes, in every non-terminal state. The restore is NOT a
//! save/restore of the pre-bracket value — the relay's resting state is on.

use super::context::FsmContext;
use super::{LifecycleEvent, StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Initializing
        StateDescriptor {
            id: StateId::Initializing,
            name: "Initializing",
            on_enter: None,
            on_exit: None,
            on_event: initializing_event,
        },
        // Index 1 — Ready
        StateDescriptor {
            id: StateId::Ready,
            name: "Ready",
            on_enter: Some(ready_enter),
            on_exit: None,
            on_event: ready_event,
        },
        // Index 2 — Sleeping
        StateDescriptor {
            id: StateId::Sleeping,
            name: "Sleeping",
            on_enter: Some(sleeping_enter),
            on_exit: None,
            on_event: sleeping_event,
        },
        // Index 3 — Disconnected
        StateDescriptor {
            id: StateId::Disconnected,
            name: "Disconnected",
            on_enter: Some(disconnected_enter),
            on_exit: None,
            on_event: disconnected_event,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  INITIALIZING state — constructed, output attached but not yet started
// ═══════════════════════════════════════════════════════════════════════════

fn initializing_event(ctx: &mut FsmContext, event: LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::Ready => {
            // Signal generation begins on this edge only.
            ctx.commands.start_output = true;
            Some(StateId::Ready)
        }
        LifecycleEvent::Disconnect => Some(StateId::Disconnected),
        LifecycleEvent::OdReadingStarting => {
            ctx.commands.relay_on = false;
            None
        }
        LifecycleEvent::OdReadingFinished => {
            ctx.commands.relay_on = true;
            None
        }
        // Sleeping is only reachable from Ready.
        LifecycleEvent::Sleep => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  READY state — PWM running, relay at its requested state
// ═══════════════════════════════════════════════════════════════════════════

fn ready_enter(ctx: &mut FsmContext) {
    info!(
        "READY: relay requested {}",
        if ctx.commands.relay_on { "ON" } else { "OFF" }
    );
}

fn ready_event(ctx: &mut FsmContext, event: LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::Sleep => Some(StateId::Sleeping),
        LifecycleEvent::Disconnect => Some(StateId::Disconnected),
        LifecycleEvent::OdReadingStarting => {
            ctx.commands.relay_on = false;
            None
        }
        LifecycleEvent::OdReadingFinished => {
            ctx.commands.relay_on = true;
            None
        }
        LifecycleEvent::Ready => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SLEEPING state — relay held off until the job wakes
// ═══════════════════════════════════════════════════════════════════════════

fn sleeping_enter(ctx: &mut FsmContext) {
    ctx.commands.relay_on = false;
    info!("SLEEPING: relay off");
}

fn sleeping_event(ctx: &mut FsmContext, event: LifecycleEvent) -> Option<StateId> {
    match event {
        LifecycleEvent::Ready => {
            // Unconditional wake-to-on, set on this edge so a direct
            // sleep→disconnect teardown never requests the relay on.
            ctx.commands.relay_on = true;
            Some(StateId::Ready)
        }
        LifecycleEvent::Disconnect => Some(StateId::Disconnected),
        LifecycleEvent::OdReadingStarting => {
            ctx.commands.relay_on = false;
            None
        }
        LifecycleEvent::OdReadingFinished => {
            ctx.commands.relay_on = true;
            None
        }
        LifecycleEvent::Sleep => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  DISCONNECTED state — terminal; relay off, PWM output released
// ═══════════════════════════════════════════════════════════════════════════

fn disconnected_enter(ctx: &mut FsmContext) {
    ctx.commands.relay_on = false;
    ctx.commands.release_output = true;
    info!("DISCONNECTED: relay off, releasing PWM output");
}

fn disconnected_event(_ctx: &mut FsmContext, _event: LifecycleEvent) -> Option<StateId> {
    None
}
