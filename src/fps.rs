use log::{debug, trace};
use thiserror::Error;

const DEFAULT_UPDATE_INTERVAL: f32 = 0.5;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("update interval must be a positive number of seconds, got {0}")]
    InvalidInterval(f32),
}

/// Epoch length for an [`FpsSampler`]. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    update_interval: f32,
}

impl SamplerConfig {
    pub fn new(update_interval: f32) -> Result<Self, ConfigError> {
        if !update_interval.is_finite() || update_interval <= 0.0 {
            return Err(ConfigError::InvalidInterval(update_interval));
        }
        Ok(Self { update_interval })
    }

    pub fn update_interval(&self) -> f32 {
        self.update_interval
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }
}

/// Averages per-frame rates over fixed epochs of `update_interval` seconds.
///
/// The published value is the mean of `time_scale / delta_time` across the
/// most recently completed epoch. It is never computed from a partial epoch.
#[derive(Debug, Clone)]
pub struct FpsSampler {
    accumulated_rate_sum: f32,
    sample_count: u32,
    time_remaining: f32,
    update_interval: f32,
    current_average: f32,
}

impl FpsSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            accumulated_rate_sum: 0.0,
            sample_count: 0,
            time_remaining: config.update_interval,
            update_interval: config.update_interval,
            current_average: 0.0,
        }
    }

    pub fn tick(&mut self, delta_time: f32) -> Option<f32> {
        self.tick_scaled(delta_time, 1.0)
    }

    /// Records one frame. Returns the new average when this tick closed an epoch.
    ///
    /// Frames with a non-positive (or non-finite) `delta_time` are ignored.
    pub fn tick_scaled(&mut self, delta_time: f32, time_scale: f32) -> Option<f32> {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            trace!("Skipping frame with delta time {delta_time}");
            return None;
        }

        self.time_remaining -= delta_time;
        self.accumulated_rate_sum += time_scale / delta_time;
        self.sample_count += 1;

        if self.time_remaining > 0.0 {
            return None;
        }

        if self.sample_count > 0 {
            self.current_average = self.accumulated_rate_sum / self.sample_count as f32;
        }
        debug!(
            "Epoch closed after {} frames: {:.2} fps",
            self.sample_count, self.current_average
        );
        self.time_remaining = self.update_interval;
        self.accumulated_rate_sum = 0.0;
        self.sample_count = 0;

        Some(self.current_average)
    }

    pub fn current_value(&self) -> f32 {
        self.current_average
    }

    pub fn label(&self) -> String {
        format_fps(self.current_average)
    }

    /// Drops the running epoch and the published value.
    pub fn reset(&mut self) {
        *self = Self::new(SamplerConfig {
            update_interval: self.update_interval,
        });
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn accumulated_rate_sum(&self) -> f32 {
        self.accumulated_rate_sum
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn update_interval(&self) -> f32 {
        self.update_interval
    }
}

impl Default for FpsSampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

pub fn format_fps(value: f32) -> String {
    format!("{value:.2} FPS")
}
