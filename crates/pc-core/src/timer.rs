//! Countdown timer state machine.
//!
//! The timer has no clock of its own. Whoever owns it calls [`Timer::tick`]
//! once per elapsed second while it is running, and learns about expiry
//! from the returned [`Tick`]. Because ticks are only applied in the
//! `Running` state, resetting or pausing a timer cancels its countdown
//! outright: there is nothing left in flight that could fire later.

use serde::Serialize;

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Armed with a full duration, not counting.
    Idle,
    /// Counting down.
    Running,
    /// Stopped part-way, resumable.
    Paused,
    /// Reached zero. Must be reset before it can run again.
    Expired,
}

/// Result of delivering one tick to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The timer was not running; nothing changed.
    Stopped,
    /// One second elapsed and time remains.
    Counting { remaining: u32 },
    /// This tick brought the countdown to zero. Reported once per expiry.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    duration: u32,
    remaining: u32,
    state: TimerState,
}

impl Timer {
    /// Creates an idle timer armed with `duration` seconds.
    pub const fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            state: TimerState::Idle,
        }
    }

    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The configured duration that [`Timer::reset`] falls back to.
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Starts or resumes the countdown. No-op when running or expired.
    pub fn start(&mut self) {
        if matches!(self.state, TimerState::Idle | TimerState::Paused) {
            self.state = TimerState::Running;
        }
    }

    /// Pauses a running countdown. No-op otherwise.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Returns to `Idle` with `seconds` remaining, or the configured
    /// duration when `None`. The configured duration is unchanged.
    pub fn reset(&mut self, seconds: Option<u32>) {
        self.remaining = seconds.unwrap_or(self.duration);
        self.state = TimerState::Idle;
    }

    /// Re-arms the timer against a new duration.
    ///
    /// A running timer keeps running and a paused one stays paused, now
    /// counting from the new duration. Idle and expired timers become idle.
    pub fn set_duration(&mut self, seconds: u32) {
        self.duration = seconds;
        self.remaining = seconds;
        self.state = match self.state {
            TimerState::Running => TimerState::Running,
            TimerState::Paused => TimerState::Paused,
            TimerState::Idle | TimerState::Expired => TimerState::Idle,
        };
    }

    /// Applies one elapsed second.
    ///
    /// A zero-length countdown expires on its first tick.
    pub fn tick(&mut self) -> Tick {
        if self.state != TimerState::Running {
            return Tick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            tracing::debug!(duration = self.duration, "timer expired");
            Tick::Expired
        } else {
            Tick::Counting {
                remaining: self.remaining,
            }
        }
    }
}
