//! Per-question countdown with pause compensation
//!
//! Time comes from the caller (seconds as `f64`), so the same code runs
//! against the wall clock and against a manual clock in tests.

/// Seconds left: `max(0, duration - (now - (start + paused_elapsed)))`
pub fn remaining(now: f64, start: f64, duration: f64, paused_elapsed: f64) -> f64 {
    (duration - (now - (start + paused_elapsed))).max(0.0)
}

/// Tracks time spent paused until the owner drains it
#[derive(Debug, Clone, Default)]
pub struct PauseTracker {
    paused: bool,
    pause_started_at: f64,
    accumulated: f64,
}

impl PauseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self, now: f64) {
        if !self.paused {
            self.paused = true;
            self.pause_started_at = now;
        }
    }

    pub fn resume(&mut self, now: f64) {
        if self.paused {
            self.paused = false;
            self.accumulated += (now - self.pause_started_at).max(0.0);
        }
    }

    /// Flip pause state; returns the new state
    pub fn toggle(&mut self, now: f64) -> bool {
        if self.paused {
            self.resume(now);
        } else {
            self.pause(now);
        }
        self.paused
    }

    /// Read and reset the paused time collected since the last drain.
    /// A pause still in progress is not included until it ends.
    pub fn drain(&mut self) -> f64 {
        std::mem::take(&mut self.accumulated)
    }
}

/// Result of polling a [`TurnTimer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerPoll {
    pub remaining: f64,
    /// True on the one poll where the countdown first hits zero
    pub timed_out: bool,
}

#[derive(Debug, Clone)]
pub struct TurnTimer {
    start: f64,
    duration: f64,
    fired: bool,
}

impl TurnTimer {
    pub fn new(duration: f64, now: f64) -> Self {
        Self {
            start: now,
            duration,
            fired: false,
        }
    }

    /// Restart the countdown for a new question
    pub fn arm(&mut self, now: f64) {
        self.start = now;
        self.fired = false;
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Push the start forward by time spent paused
    pub fn absorb_pause(&mut self, paused: f64) {
        self.start += paused;
    }

    pub fn remaining(&self, now: f64) -> f64 {
        remaining(now, self.start, self.duration, 0.0)
    }

    pub fn poll(&mut self, now: f64) -> TimerPoll {
        let left = self.remaining(now);
        let timed_out = left <= 0.0 && !self.fired;
        if timed_out {
            self.fired = true;
        }
        TimerPoll {
            remaining: left,
            timed_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_remaining_formula() {
        assert_eq!(remaining(3.0, 0.0, 10.0, 0.0), 7.0);
        assert_eq!(remaining(3.0, 0.0, 10.0, 2.0), 9.0);
        assert_eq!(remaining(30.0, 0.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_timeout_fires_once_per_arm() {
        let mut timer = TurnTimer::new(10.0, 0.0);
        assert!(!timer.poll(9.9).timed_out);
        assert!(timer.poll(10.0).timed_out);
        assert!(!timer.poll(10.5).timed_out);
        assert!(!timer.poll(20.0).timed_out);

        timer.arm(20.0);
        assert_eq!(timer.poll(25.0).remaining, 5.0);
        assert!(timer.poll(31.0).timed_out);
    }

    #[test]
    fn test_pause_leaves_remaining_unchanged() {
        let mut timer = TurnTimer::new(10.0, 0.0);
        let mut pause = PauseTracker::new();

        let before = timer.remaining(2.0);
        assert!(pause.toggle(2.0));
        // Nothing drains mid-pause
        assert_eq!(pause.drain(), 0.0);
        assert!(!pause.toggle(7.0));
        timer.absorb_pause(pause.drain());

        assert_eq!(timer.remaining(7.0), before);
        assert_eq!(pause.drain(), 0.0);
    }

    #[test]
    fn test_repeated_pause_calls_are_ignored() {
        let mut pause = PauseTracker::new();
        pause.pause(1.0);
        pause.pause(3.0);
        pause.resume(4.0);
        pause.resume(9.0);
        assert_eq!(pause.drain(), 3.0);
    }

    proptest! {
        #[test]
        fn prop_remaining_idempotent(now in 0.0f64..1e4, start in 0.0f64..1e4, d in 0.0f64..120.0) {
            let a = remaining(now, start, d, 0.0);
            let b = remaining(now, start, d, 0.0);
            prop_assert_eq!(a, b);
            prop_assert!(a >= 0.0 && a <= d.max(d - (now - start)));
        }

        #[test]
        fn prop_pause_shift(start in 0.0f64..100.0, t in 0.0f64..5.0, dt in 0.0f64..50.0) {
            let mut timer = TurnTimer::new(10.0, start);
            let mut pause = PauseTracker::new();
            let before = timer.remaining(start + t);
            pause.pause(start + t);
            pause.resume(start + t + dt);
            timer.absorb_pause(pause.drain());
            let after = timer.remaining(start + t + dt);
            prop_assert!((before - after).abs() < 1e-6);
        }
    }
}
