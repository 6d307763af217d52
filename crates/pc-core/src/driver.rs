//! Stepping a timer through a day's segment sequence.

use crate::sequence::{self, Segment};
use crate::timer::{Tick, Timer};

/// What happened when a tick reached the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// The timer was not running.
    Idle,
    /// The current segment counted down by one second.
    Ticked { remaining: u32 },
    /// The current segment expired and the next one started automatically.
    Advanced { index: usize },
    /// The final segment expired. The day can be marked done.
    Finished,
}

/// Overall progress through the sequence, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub elapsed: u64,
    pub total: u64,
}

/// Owns a day's sequence, the current position in it and its timer.
///
/// All operations are no-ops on an empty sequence.
#[derive(Debug, Clone)]
pub struct SequenceDriver {
    segments: Vec<Segment>,
    index: usize,
    timer: Timer,
}

impl SequenceDriver {
    pub fn new(segments: Vec<Segment>) -> Self {
        let first = segments.first().map_or(0, |s| s.seconds);
        Self {
            segments,
            index: 0,
            timer: Timer::new(first),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Segment> {
        self.segments.get(self.index)
    }

    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    fn last_index(&self) -> Option<usize> {
        self.segments.len().checked_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&mut self) {
        if !self.is_empty() {
            self.timer.start();
        }
    }

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    /// Starts when stopped, pauses when running.
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Restores the current segment's full duration without moving.
    pub fn reset_segment(&mut self) {
        if let Some(seconds) = self.current().map(|s| s.seconds) {
            self.timer.set_duration(seconds);
            self.timer.reset(None);
        }
    }

    /// Moves to the next segment without starting it.
    ///
    /// On the final segment this only stops the timer, so skipping can
    /// never make the day look finished.
    pub fn skip(&mut self) {
        let Some(last) = self.last_index() else {
            return;
        };
        if self.index < last {
            self.move_to(self.index + 1);
            self.timer.reset(None);
        } else {
            self.timer.pause();
        }
    }

    /// Goes back to the first segment, stopped.
    pub fn restart_day(&mut self) {
        if self.is_empty() {
            return;
        }
        self.move_to(0);
        self.timer.reset(None);
    }

    /// Delivers one elapsed second.
    pub fn tick(&mut self) -> DriverEvent {
        match self.timer.tick() {
            Tick::Stopped => DriverEvent::Idle,
            Tick::Counting { remaining } => DriverEvent::Ticked { remaining },
            Tick::Expired => self.on_expired(),
        }
    }

    /// Advances past an expired segment and keeps the session flowing.
    fn on_expired(&mut self) -> DriverEvent {
        let Some(last) = self.last_index() else {
            return DriverEvent::Idle;
        };
        let next = (self.index + 1).min(last);
        if next == self.index {
            tracing::debug!(index = self.index, "sequence finished");
            return DriverEvent::Finished;
        }
        self.move_to(next);
        self.timer.start();
        tracing::debug!(index = next, "advanced to next segment");
        DriverEvent::Advanced { index: next }
    }

    fn move_to(&mut self, index: usize) {
        self.index = index;
        let seconds = self.segments[index].seconds;
        self.timer.set_duration(seconds);
    }

    /// True only once the final segment has run all the way down.
    pub fn can_mark_done(&self) -> bool {
        self.last_index() == Some(self.index) && self.timer.remaining() == 0
    }

    pub fn progress(&self) -> Progress {
        let current = self.current().map_or(0, |s| s.seconds);
        let into_current = current.saturating_sub(self.timer.remaining());
        Progress {
            elapsed: sequence::elapsed_before(&self.segments, self.index)
                + u64::from(into_current),
            total: sequence::total_seconds(&self.segments),
        }
    }

    /// The next work segment, shown as a preview while resting.
    pub fn up_next(&self) -> Option<&Segment> {
        sequence::next_work(&self.segments, self.index)
    }
}
