//! Host-driven timers.
//!
//! Neither timer owns a callback or a thread: the owner calls `advance` with
//! the wall-clock time that passed and reacts to the firings it reports.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

// ── Repeating timer ──────────────────────────────────────────────────────────

/// Fires every `interval` while running.
#[derive(Clone, Debug)]
pub struct Timer {
    interval: Duration,
    /// Time accumulated since the last firing.
    elapsed: Duration,
    state: TimerState,
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            state: TimerState::Stopped,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Begin a fresh interval.  Already running → no-op, so a second `start`
    /// never shifts the schedule.
    pub fn start(&mut self) {
        if self.state == TimerState::Running {
            return;
        }
        self.elapsed = Duration::ZERO;
        self.state = TimerState::Running;
    }

    /// Suspend firing, keeping the progress made into the current interval.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Continue from where `pause` left off.
    pub fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }

    pub fn stop(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = TimerState::Stopped;
    }

    /// Let `dt` pass and return how many times the interval elapsed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.state != TimerState::Running || self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Time left until the next firing.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }
}

// ── One-shot timer ───────────────────────────────────────────────────────────

/// Waits `delay`, reports a single firing, then stops itself.
#[derive(Clone, Debug)]
pub struct WaitAndRun {
    delay: Duration,
    elapsed: Duration,
    state: TimerState,
}

impl WaitAndRun {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            state: TimerState::Stopped,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// `true` from `start` until the delay has elapsed or `stop` is called.
    /// A paused wait still counts as running.
    pub fn is_running(&self) -> bool {
        self.state != TimerState::Stopped
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.elapsed = Duration::ZERO;
        self.state = TimerState::Running;
    }

    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }

    pub fn stop(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = TimerState::Stopped;
    }

    /// Returns `true` exactly once, on the advance that completes the delay.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.delay {
            self.stop();
            return true;
        }
        false
    }
}
