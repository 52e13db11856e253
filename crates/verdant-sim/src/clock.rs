//! Tick driver: turns irregular wall-clock frames into fixed-size steps.
//!
//! Elapsed time per frame is clamped so a stall cannot trigger a long
//! catch-up burst. While paused, frames are still sampled (so resuming does
//! not see the paused interval) but nothing accumulates and no step runs.

use std::time::{Duration, Instant};

use verdant_core::constants::{DT, MAX_FRAME_SECS};

/// Outcome of one host frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Steps executed this frame.
    pub steps: u32,
    /// Leftover accumulator as a fraction of one step, for render interpolation.
    pub interpolation: f64,
}

#[derive(Debug, Clone)]
pub struct TickDriver {
    step: Duration,
    max_frame: Duration,
    accumulator: Duration,
    last: Option<Instant>,
    running: bool,
    paused: bool,
}

impl TickDriver {
    /// Non-positive or non-finite inputs fall back to the built-in defaults.
    pub fn new(step_secs: f64, max_frame_secs: f64) -> Self {
        let step = positive_duration(step_secs).unwrap_or_else(|| Duration::from_secs_f64(DT));
        let max_frame = positive_duration(max_frame_secs)
            .unwrap_or_else(|| Duration::from_secs_f64(MAX_FRAME_SECS))
            .max(step);
        Self {
            step,
            max_frame,
            accumulator: Duration::ZERO,
            last: None,
            running: false,
            paused: false,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.paused = false;
        self.accumulator = Duration::ZERO;
        self.last = Some(now);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.accumulator = Duration::ZERO;
        self.last = None;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume and re-base the wall-clock reference on `now`.
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.last = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Sample the wall clock and run as many steps as have accumulated.
    pub fn frame(&mut self, now: Instant, step: impl FnMut()) -> FrameReport {
        if !self.running {
            return FrameReport::default();
        }
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last = Some(now);
        self.advance(elapsed, step)
    }

    /// Feed `elapsed` wall-clock time and drain whole steps.
    pub fn advance(&mut self, elapsed: Duration, mut step: impl FnMut()) -> FrameReport {
        if !self.running || self.paused {
            return FrameReport {
                steps: 0,
                interpolation: self.interpolation(),
            };
        }

        self.accumulator += elapsed.min(self.max_frame);

        let mut steps = 0;
        while self.accumulator >= self.step {
            step();
            self.accumulator -= self.step;
            steps += 1;
        }

        FrameReport {
            steps,
            interpolation: self.interpolation(),
        }
    }

    fn interpolation(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.step.as_secs_f64()
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(DT, MAX_FRAME_SECS)
    }
}

fn positive_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> TickDriver {
        let mut d = TickDriver::new(0.01, 0.05);
        d.start(Instant::now());
        d
    }

    #[test]
    fn drains_whole_steps_and_keeps_remainder() {
        let mut d = driver();
        let mut count = 0;
        let report = d.advance(Duration::from_millis(35), || count += 1);
        assert_eq!(report.steps, 3);
        assert_eq!(count, 3);
        assert!((report.interpolation - 0.5).abs() < 1e-6);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut d = driver();
        let mut count = 0;
        let report = d.advance(Duration::from_secs(10), || count += 1);
        assert_eq!(report.steps, 5);
        assert_eq!(count, 5);
    }

    #[test]
    fn paused_driver_does_not_step_or_accumulate() {
        let mut d = driver();
        d.pause();
        let mut count = 0;
        let report = d.advance(Duration::from_millis(40), || count += 1);
        assert_eq!(report.steps, 0);
        assert_eq!(count, 0);

        let later = Instant::now() + Duration::from_secs(5);
        d.resume(later);
        let report = d.frame(later, || count += 1);
        assert_eq!(report.steps, 0);
    }

    #[test]
    fn stopped_driver_ignores_frames() {
        let mut d = driver();
        d.stop();
        let mut count = 0;
        let report = d.frame(Instant::now() + Duration::from_secs(1), || count += 1);
        assert_eq!(report, FrameReport::default());
        assert!(!d.is_running());
    }

    #[test]
    fn invalid_inputs_fall_back_to_defaults() {
        let d = TickDriver::new(-1.0, f64::NAN);
        assert_eq!(d.step(), Duration::from_secs_f64(DT));
    }
}
