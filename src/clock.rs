//! Frame pacing
//!
//! The native loop blocks in [`FixedRateClock::tick`]; the browser cannot
//! block, so its animation callback asks a [`FrameThrottle`] whether enough
//! time has gone by to run the next frame.

use std::time::{Duration, Instant};

/// Slack when comparing animation timestamps against the frame interval
const JITTER_MS: f64 = 0.25;

/// Something that can hold the loop to a target frame rate
pub trait FrameClock {
    /// Wait until `1 / target_fps` has passed since the previous call.
    /// Returns the time elapsed since the previous call (sleep included).
    fn tick(&mut self, target_fps: u32) -> Duration;
}

/// Sleeping clock for native front ends
#[derive(Debug, Default)]
pub struct FixedRateClock {
    last: Option<Instant>,
}

impl FixedRateClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for FixedRateClock {
    fn tick(&mut self, target_fps: u32) -> Duration {
        let frame = frame_duration(target_fps);
        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return Duration::ZERO;
        };
        let busy = last.elapsed();
        if busy < frame {
            std::thread::sleep(frame - busy);
        }
        let now = Instant::now();
        self.last = Some(now);
        now - last
    }
}

/// Clock that never waits (tests, replays)
#[derive(Debug, Default)]
pub struct Unthrottled;

impl FrameClock for Unthrottled {
    fn tick(&mut self, _target_fps: u32) -> Duration {
        Duration::ZERO
    }
}

/// Length of one frame at `fps` (a zero rate means no limit)
pub fn frame_duration(fps: u32) -> Duration {
    if fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(1.0 / f64::from(fps))
    }
}

/// Admits frames at a fixed rate from a stream of timestamps
///
/// Timestamps are milliseconds, as handed to `requestAnimationFrame`
/// callbacks. Leftover time carries over so a 60 Hz display running a 60 fps
/// game does not drop frames to timestamp jitter.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
    accumulator_ms: f64,
}

impl FrameThrottle {
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval_ms: frame_duration(target_fps).as_secs_f64() * 1000.0,
            last_ms: None,
            accumulator_ms: 0.0,
        }
    }

    /// Whether a frame should run at `now_ms`
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return true;
        };
        self.last_ms = Some(now_ms);
        self.accumulator_ms += (now_ms - last).max(0.0);
        if self.accumulator_ms + JITTER_MS < self.interval_ms {
            return false;
        }
        self.accumulator_ms -= self.interval_ms;
        // After a stall (hidden tab) run one frame, not a burst
        if self.accumulator_ms > self.interval_ms {
            self.accumulator_ms = 0.0;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(0), Duration::ZERO);
        let d = frame_duration(60);
        assert!(d > Duration::from_micros(16_600) && d < Duration::from_micros(16_700));
    }

    #[test]
    fn test_fixed_rate_clock_spaces_ticks() {
        let mut clock = FixedRateClock::new();
        assert_eq!(clock.tick(100), Duration::ZERO);
        let elapsed = clock.tick(100);
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn test_throttle_at_display_rate() {
        let mut throttle = FrameThrottle::new(60);
        let step = 1000.0 / 60.0;
        assert!(throttle.ready(0.0));
        let admitted = (1..=60).filter(|i| throttle.ready(*i as f64 * step)).count();
        assert_eq!(admitted, 60);
    }

    #[test]
    fn test_throttle_on_fast_display() {
        let mut throttle = FrameThrottle::new(60);
        let step = 1000.0 / 120.0;
        throttle.ready(0.0);
        let admitted = (1..=120).filter(|i| throttle.ready(*i as f64 * step)).count();
        assert!((59..=61).contains(&admitted), "admitted {admitted}");
    }

    #[test]
    fn test_throttle_after_stall() {
        let mut throttle = FrameThrottle::new(60);
        throttle.ready(0.0);
        assert!(throttle.ready(5000.0));
        assert!(!throttle.ready(5001.0));
    }
}
