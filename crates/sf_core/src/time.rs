//! Clock abstraction and real-time frame pacing.
//!
//! The controller never reads a global timer. It owns a `Clock` and reads it once
//! per frame; `FrameLimiter` measures how long the frame took and sleeps the rest
//! of the target interval through the same clock, so tests can drive time by hand
//! with `ManualClock`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Largest frame delta handed to states. Longer stalls are clamped.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(250);

pub trait Clock {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Hand-driven clock. Clones share the same time source, so a test can keep one
/// handle while the controller owns another. Sleeping advances time instantly.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    slept: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    /// Total time spent in `sleep` so far.
    pub fn total_slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept.set(self.slept.get() + duration);
        self.advance(duration);
    }
}

/// Clamp the delta between two clock readings to `MAX_FRAME_DT`.
pub fn frame_delta(previous: Duration, now: Duration) -> Duration {
    let dt = now.saturating_sub(previous);
    if dt > MAX_FRAME_DT {
        log::warn!(
            "Frame took {:.1}ms, capping delta to {}ms",
            dt.as_secs_f64() * 1000.0,
            MAX_FRAME_DT.as_millis()
        );
        MAX_FRAME_DT
    } else {
        dt
    }
}

/// Sleeps away the remainder of each frame interval and keeps a smoothed FPS.
pub struct FrameLimiter {
    target_interval: Duration,
    last_tick: Option<Duration>,
    pub real_dt: Duration,
    pub frame_count: u64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameLimiter {
    /// `fps == 0` disables the limit; frames run as fast as they are produced.
    pub fn new(fps: u32) -> Self {
        let nominal = if fps == 0 { 60.0 } else { fps as f64 };
        Self {
            target_interval: interval_for(fps),
            last_tick: None,
            real_dt: Duration::ZERO,
            frame_count: 0,
            fps_samples: [1.0 / nominal; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: nominal,
            smoothed_frame_time_ms: 1000.0 / nominal,
        }
    }

    pub fn target_interval(&self) -> Duration {
        self.target_interval
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.target_interval = interval_for(fps);
    }

    /// Wait until a full target interval has passed since the previous tick and
    /// return the real duration of the frame that just ended.
    pub fn tick(&mut self, clock: &mut dyn Clock) -> Duration {
        if let Some(last) = self.last_tick {
            let elapsed = clock.now().saturating_sub(last);
            if elapsed < self.target_interval {
                clock.sleep(self.target_interval - elapsed);
            }
        }

        let now = clock.now();
        self.real_dt = match self.last_tick {
            Some(last) => now.saturating_sub(last),
            None => self.target_interval,
        };
        self.last_tick = Some(now);
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt.as_secs_f64();
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        self.real_dt
    }
}

fn interval_for(fps: u32) -> Duration {
    if fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(1.0 / fps as f64)
    }
}
