//! Tick scheduling
//!
//! A `Scheduler` holds at most one pending invocation. Rounds report the
//! delay they want; the session schedules it and fires when it elapses.

use std::time::{Duration, Instant};

/// One-shot timer owned by a session
pub trait Scheduler {
    /// Replace any pending invocation with one `delay` from now
    fn schedule_next(&mut self, delay: Duration);

    /// Drop the pending invocation, if any
    fn cancel(&mut self);

    /// Delay of the pending invocation, if one is scheduled
    fn pending(&self) -> Option<Duration>;
}

/// Simulated clock for tests and headless runs. Time only moves when told.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Duration,
    deadline: Option<Duration>,
    delay: Option<Duration>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Jump straight to the pending deadline and consume it.
    /// Returns the new time, or `None` if nothing was scheduled.
    pub fn advance_to_deadline(&mut self) -> Option<Duration> {
        let deadline = self.deadline.take()?;
        self.delay = None;
        self.now = self.now.max(deadline);
        Some(self.now)
    }

    /// Move time forward by `by`. Returns true if the pending deadline was
    /// reached (and consumed).
    pub fn advance(&mut self, by: Duration) -> bool {
        self.now += by;
        match self.deadline {
            Some(deadline) if deadline <= self.now => {
                self.deadline = None;
                self.delay = None;
                true
            }
            _ => false,
        }
    }
}

impl Scheduler for VirtualClock {
    fn schedule_next(&mut self, delay: Duration) {
        self.deadline = Some(self.now + delay);
        self.delay = Some(delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
        self.delay = None;
    }

    fn pending(&self) -> Option<Duration> {
        self.delay
    }
}

/// Wall clock that blocks the calling thread until the deadline
#[derive(Debug, Clone, Default)]
pub struct RealtimeClock {
    deadline: Option<Instant>,
    delay: Option<Duration>,
}

impl RealtimeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep until the pending deadline and consume it.
    /// Returns false if nothing was scheduled.
    pub fn wait(&mut self) -> bool {
        let Some(deadline) = self.deadline.take() else {
            return false;
        };
        self.delay = None;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        true
    }
}

impl Scheduler for RealtimeClock {
    fn schedule_next(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
        self.delay = Some(delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
        self.delay = None;
    }

    fn pending(&self) -> Option<Duration> {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_clock_fires_once() {
        let mut clock = VirtualClock::new();
        assert_eq!(clock.advance_to_deadline(), None);

        clock.schedule_next(Duration::from_millis(150));
        assert_eq!(clock.pending(), Some(Duration::from_millis(150)));
        assert!(!clock.advance(Duration::from_millis(100)));
        assert!(clock.advance(Duration::from_millis(50)));
        assert_eq!(clock.pending(), None);
        assert!(!clock.advance(Duration::from_millis(500)));
        assert_eq!(clock.now(), Duration::from_millis(650));
    }

    #[test]
    fn rescheduling_replaces_the_deadline() {
        let mut clock = VirtualClock::new();
        clock.schedule_next(Duration::from_millis(150));
        clock.schedule_next(Duration::from_millis(80));
        assert_eq!(clock.advance_to_deadline(), Some(Duration::from_millis(80)));
        assert_eq!(clock.advance_to_deadline(), None);
    }

    #[test]
    fn cancel_clears_pending() {
        let mut clock = VirtualClock::new();
        clock.schedule_next(Duration::from_millis(16));
        clock.cancel();
        assert_eq!(clock.pending(), None);
        assert!(!clock.advance(Duration::from_secs(1)));
    }

    #[test]
    fn realtime_clock_waits() {
        let mut clock = RealtimeClock::new();
        assert!(!clock.wait());
        let start = Instant::now();
        clock.schedule_next(Duration::from_millis(5));
        assert!(clock.wait());
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert_eq!(clock.pending(), None);
    }
}
