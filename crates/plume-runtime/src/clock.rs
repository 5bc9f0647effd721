//! Frame clock with frames-per-second measurement

use std::time::{Duration, Instant};

/// Longest frame delta the clock will report, in seconds
const MAX_FRAME_TIME: f64 = 0.25;

/// How much wall time must pass before the FPS figure is refreshed
const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Tracks frame timing and a frames-per-second figure refreshed once a second
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Number of frames ticked since creation
    pub frame_count: u64,
    /// Most recent frames-per-second measurement (0 until the first window closes)
    fps: f64,
    /// Frames counted in the current measurement window
    window_frames: u32,
    /// Start of the current measurement window
    window_start: Instant,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            fps: 0.0,
            window_frames: 0,
            window_start: now,
            last_instant: now,
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the clock as if the frame happened at `now`
    pub fn tick_at(&mut self, now: Instant) {
        self.frame_count += 1;

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.window_start = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now
            .saturating_duration_since(self.last_instant)
            .as_secs_f64();
        self.last_instant = now;

        self.delta_time = elapsed.min(MAX_FRAME_TIME);
        self.total_time += self.delta_time;

        self.window_frames += 1;
        let window = now.saturating_duration_since(self.window_start);
        if window >= FPS_WINDOW {
            self.fps = f64::from(self.window_frames) / window.as_secs_f64();
            self.window_frames = 0;
            self.window_start = now;
        }
    }

    /// Frames per second measured over the last completed window
    pub fn fps(&self) -> f64 {
        self.fps
    }
}
