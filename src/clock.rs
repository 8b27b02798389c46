/// Fixed-rate tick pump.  The only place that reads wall-clock time.

use std::time::{Duration, Instant};

pub struct TickClock {
    origin: Instant,
    frame: Duration,
    frame_start: Instant,
    ticks: u64,
}

impl TickClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self { origin: now, frame: frame_budget(fps), frame_start: now, ticks: 0 }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Start a tick and return its timestamp: milliseconds since the clock
    /// was created.  Every component sees this one reading for the tick.
    pub fn begin_tick(&mut self) -> u64 {
        self.frame_start = Instant::now();
        self.ticks += 1;
        self.frame_start.duration_since(self.origin).as_millis() as u64
    }

    /// Sleep off whatever is left of the frame budget.
    pub fn end_tick(&self) {
        if let Some(rest) = remaining(self.frame, self.frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

/// Duration of one tick at `fps` (clamped to at least 1 Hz).
pub fn frame_budget(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

/// Time left in a frame of length `frame` after `elapsed`, if any.
pub fn remaining(frame: Duration, elapsed: Duration) -> Option<Duration> {
    frame.checked_sub(elapsed).filter(|d| !d.is_zero())
}
