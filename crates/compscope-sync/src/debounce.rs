//! Optimistic local value with a time-boxed commit to shared state.
//!
//! ```text
//!            edit                     deadline reached (poll)
//!   Idle ───────────▶ Pending ─────────────────────────────▶ Idle
//!     ▲                │  ▲ edit (re-arm)                     │
//!     │                └──┘                                   │
//!     └──── commit / flush / sync (timer cancelled) ◀─────────┘
//! ```
//!
//! The local value is what the user sees and is updated synchronously on
//! every edit. The committed value only changes on a commit, and every commit
//! is returned to the caller so it can be pushed to shared state. At most one
//! deadline is armed at a time.

use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// Where a debounced value is in its commit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePhase {
    /// Local and committed values agree; nothing is armed
    Idle,
    /// Local value changed; it commits once `deadline` passes
    Pending { deadline: Instant },
}

/// A debounced value of type `T`
#[derive(Debug)]
pub struct Debouncer<T, C = SystemClock> {
    local: T,
    committed: T,
    delay: Duration,
    deadline: Option<Instant>,
    clock: C,
    commits: u64,
}

impl<T: Clone> Debouncer<T, SystemClock> {
    /// Debouncer on the wall clock
    pub fn with_system_clock(initial: T, delay: Duration) -> Self {
        Self::new(initial, delay, SystemClock)
    }
}

impl<T: Clone, C: Clock> Debouncer<T, C> {
    pub fn new(initial: T, delay: Duration, clock: C) -> Self {
        Self {
            local: initial.clone(),
            committed: initial,
            delay,
            deadline: None,
            clock,
            commits: 0,
        }
    }

    /// The value to display: always the latest local edit
    pub fn value(&self) -> &T {
        &self.local
    }

    /// The value most recently pushed to shared state
    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn phase(&self) -> DebouncePhase {
        match self.deadline {
            Some(deadline) => DebouncePhase::Pending { deadline },
            None => DebouncePhase::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Instant at which the armed commit fires, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of commits so far
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Record a user edit and (re)arm the commit deadline.
    ///
    /// Any previously armed deadline is replaced, so intermediate values
    /// never reach shared state.
    pub fn edit(&mut self, value: T) {
        self.local = value;
        let deadline = self.clock.now() + self.delay;
        if self.deadline.replace(deadline).is_some() {
            tracing::trace!(delay_ms = self.delay.as_millis() as u64, "debounce re-armed");
        }
    }

    /// Edit the local value in place, then re-arm as [`Debouncer::edit`] does
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        let mut next = self.local.clone();
        f(&mut next);
        self.edit(next);
    }

    /// Fire the armed commit if its deadline has passed
    pub fn poll(&mut self) -> Option<T> {
        let deadline = self.deadline?;
        if self.clock.now() < deadline {
            return None;
        }
        Some(self.apply_commit())
    }

    /// Commit `value` right away (blur, drag release), cancelling any timer
    pub fn commit(&mut self, value: T) -> T {
        self.local = value;
        self.apply_commit()
    }

    /// Commit the pending local value right away, if there is one
    pub fn flush(&mut self) -> Option<T> {
        self.deadline?;
        Some(self.apply_commit())
    }

    /// Adopt an externally committed value.
    ///
    /// Shared state wins over any in-flight edit: the local value is
    /// overwritten and the pending deadline dropped without committing.
    pub fn sync(&mut self, value: T) {
        if self.deadline.take().is_some() {
            tracing::debug!("external update cancelled pending commit");
        }
        self.local = value.clone();
        self.committed = value;
    }

    /// Drop a pending edit without committing it; the local value reverts
    pub fn cancel(&mut self) -> bool {
        if self.deadline.take().is_none() {
            return false;
        }
        self.local = self.committed.clone();
        true
    }

    fn apply_commit(&mut self) -> T {
        self.deadline = None;
        self.committed = self.local.clone();
        self.commits += 1;
        tracing::debug!(commits = self.commits, "debounced value committed");
        self.committed.clone()
    }
}
