use std::time::{Duration, Instant};

/// Measures wall-clock time between frames.
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Seconds since the previous call. May be zero on coarse timers.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        dt.as_secs_f32()
    }

    pub fn since_last_frame(&self) -> f32 {
        self.last_frame.elapsed().as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FrameLimiter {
    max_frame_time: Option<f32>,
}

impl FrameLimiter {
    pub fn new(max_fps: Option<f32>) -> Self {
        let max_frame_time = max_fps.map(|fps| 1.0 / fps.max(1.0));
        Self { max_frame_time }
    }

    pub fn max_frame_time(&self) -> Option<f32> {
        self.max_frame_time
    }

    pub fn sleep(&self, frame_elapsed: f32) {
        if let Some(wait) = self.remaining(frame_elapsed) {
            std::thread::sleep(wait);
        }
    }

    fn remaining(&self, frame_elapsed: f32) -> Option<Duration> {
        let cap = self.max_frame_time?;
        (frame_elapsed < cap).then(|| Duration::from_secs_f32(cap - frame_elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(2));
        let dt = clock.tick();
        assert!(dt >= 0.002);
        assert!(clock.tick() >= 0.0);
    }

    #[test]
    fn limiter_caps_frame_time() {
        let limiter = FrameLimiter::new(Some(50.0));
        assert_eq!(limiter.max_frame_time(), Some(0.02));
        let wait = limiter.remaining(0.015).unwrap();
        assert!((wait.as_secs_f32() - 0.005).abs() < 1e-4);
        assert_eq!(limiter.remaining(0.025), None);
    }

    #[test]
    fn limiter_clamps_tiny_caps() {
        assert_eq!(FrameLimiter::new(Some(0.25)).max_frame_time(), Some(1.0));
        assert_eq!(FrameLimiter::new(None).remaining(0.0), None);
    }
}
