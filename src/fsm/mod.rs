//! Table-driven lifecycle state machine.
//!
//! Classic embedded FSM pattern expressed in safe Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable                                                  │
//! │  ┌──────────────┬───────────┬──────────┬──────────────────┐  │
//! │  │ StateId       │ on_enter  │ on_exit  │ on_event         │  │
//! │  ├──────────────┼───────────┼──────────┼──────────────────┤  │
//! │  │ Initializing  │ fn(ctx)   │ fn(ctx)  │ fn(ctx,ev)->Opt  │  │
//! │  │ Ready         │ fn(ctx)   │ fn(ctx)  │ fn(ctx,ev)->Opt  │  │
//! │  │ Sleeping      │ fn(ctx)   │ fn(ctx)  │ fn(ctx,ev)->Opt  │  │
//! │  │ Disconnected  │ fn(ctx)   │ fn(ctx)  │ fn(ctx,ev)->Opt  │  │
//! │  └──────────────┴───────────┴──────────┴──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine is driven entirely by externally delivered events: the host
//! calls [`Fsm::dispatch`] with a [`LifecycleEvent`] and the **current**
//! state's `on_event` handler decides whether to transition. On a
//! transition the engine runs `on_exit` for the current state, then
//! `on_enter` for the next. All handlers receive `&mut FsmContext`, which
//! carries the requested relay state and configuration.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all possible lifecycle states.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Initializing = 0,
    Ready = 1,
    Sleeping = 2,
    Disconnected = 3,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert a `u8` index back to `StateId`. Panics on out-of-range in
    /// debug builds; returns `Disconnected` in release (safe terminal).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Initializing,
            1 => Self::Ready,
            2 => Self::Sleeping,
            3 => Self::Disconnected,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Disconnected
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound lifecycle events
// ---------------------------------------------------------------------------

/// Events the host environment delivers to the job, in an order it controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The job should be (or return to being) ready.
    Ready,
    /// The job should enter its sleeping state.
    Sleep,
    /// The job is being torn down.
    Disconnect,
    /// An optical-density reading is about to start; PWM switching noise
    /// would corrupt the measurement.
    OdReadingStarting,
    /// The optical-density reading has finished.
    OdReadingFinished,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-event handler of the current state.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateEventFn = fn(&mut FsmContext, LifecycleEvent) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single lifecycle state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_event: StateEventFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The lifecycle state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and dispatches
/// external events against the current state. Purely synchronous: every
/// dispatch completes before returning.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `dispatch()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("lifecycle starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Deliver one external event to the current state.
    ///
    /// 1. Call `on_event` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn dispatch(&mut self, event: LifecycleEvent, ctx: &mut FsmContext) {
        let next = (self.table[self.current].on_event)(ctx, event);

        if let Some(next_id) = next {
            if next_id as usize != self.current {
                self.transition(next_id, ctx);
            }
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "lifecycle transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current state
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        // Update pointer
        self.current = next_idx;

        // Enter new state
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
