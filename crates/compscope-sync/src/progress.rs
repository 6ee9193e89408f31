//! Startup loading progress with a session-owned completion latch.

use std::time::{Duration, Instant};

use crate::clock::Clock;

/// Flags that outlive individual views for the rest of a session.
///
/// Owned by the composing application and passed to whatever needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    loading_complete: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading_complete(&self) -> bool {
        self.loading_complete
    }

    pub fn mark_loading_complete(&mut self) {
        self.loading_complete = true;
    }
}

/// Time-based progress from 0 to 100 that never moves backwards.
///
/// Once any instance reaches 100 the session latch is set, and later
/// instances started from that session report 100 from the outset.
#[derive(Debug)]
pub struct LoadingProgress<C> {
    clock: C,
    started: Instant,
    duration: Duration,
    last: f64,
}

impl<C: Clock> LoadingProgress<C> {
    pub fn start(session: &SessionState, duration: Duration, clock: C) -> Self {
        let started = clock.now();
        let last = if session.is_loading_complete() { 100.0 } else { 0.0 };
        Self { clock, started, duration, last }
    }

    /// Current progress in percent; reaching 100 sets the session latch
    pub fn progress(&mut self, session: &mut SessionState) -> f64 {
        if session.is_loading_complete() {
            self.last = 100.0;
            return self.last;
        }

        let elapsed = self.clock.now().saturating_duration_since(self.started);
        let target = if self.duration.is_zero() {
            100.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64() * 100.0).min(100.0)
        };

        self.last = self.last.max(target);
        if self.last >= 100.0 {
            session.mark_loading_complete();
        }
        self.last
    }

    pub fn is_complete(&self) -> bool {
        self.last >= 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_progress_advances_with_time() {
        let clock = ManualClock::new();
        let mut session = SessionState::new();
        let mut progress = LoadingProgress::start(&session, Duration::from_secs(3), clock.clone());

        assert_eq!(progress.progress(&mut session), 0.0);
        clock.advance_ms(1500);
        assert!((progress.progress(&mut session) - 50.0).abs() < 1e-9);
        assert!(!session.is_loading_complete());

        clock.advance_ms(5000);
        assert_eq!(progress.progress(&mut session), 100.0);
        assert!(progress.is_complete());
        assert!(session.is_loading_complete());
    }

    #[test]
    fn test_completed_session_skips_replay() {
        let clock = ManualClock::new();
        let mut session = SessionState::new();
        session.mark_loading_complete();

        let mut remounted = LoadingProgress::start(&session, Duration::from_secs(3), clock);
        assert!(remounted.is_complete());
        assert_eq!(remounted.progress(&mut session), 100.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let clock = ManualClock::new();
        let mut session = SessionState::new();
        let mut progress = LoadingProgress::start(&session, Duration::ZERO, clock);
        assert_eq!(progress.progress(&mut session), 100.0);
    }
}
