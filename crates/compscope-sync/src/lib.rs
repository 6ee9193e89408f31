//! Compscope Sync - Debounced input and deferred recomputation
//!
//! User edits land in a local value immediately and reach shared state only
//! after input quiesces ([`Debouncer`]). Shared state changes then drive a
//! second, interruptible stage ([`DeferredValue`]) that reports whether the
//! derived result is stale and drops results computed for superseded input.
//!
//! Time is always read through a [`Clock`], so tests can drive both stages
//! with [`ManualClock`] instead of real timers.

pub mod clock;
pub mod debounce;
pub mod deferred;
pub mod driver;
pub mod progress;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use debounce::{DebouncePhase, Debouncer};
pub use deferred::{Completion, DeferredValue, Ticket};
pub use driver::{spawn_debouncer, DebounceHandle, DriverClosed};
pub use progress::{LoadingProgress, SessionState};
