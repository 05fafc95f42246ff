use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::fps::{FpsSampler, SamplerConfig, format_fps};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse trace: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct TraceFrame {
    pub dt: f32,
    #[serde(default = "unit_time_scale")]
    pub time_scale: f32,
}

fn unit_time_scale() -> f32 {
    1.0
}

/// Recorded frame times, either `[dt, ...]` or `{ "frames": [{ "dt": .. }] }`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameTrace {
    pub frames: Vec<TraceFrame>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTrace {
    Plain(Vec<f32>),
    Detailed { frames: Vec<TraceFrame> },
}

impl FrameTrace {
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let frames = match serde_json::from_str::<RawTrace>(json)? {
            RawTrace::Plain(dts) => dts
                .into_iter()
                .map(|dt| TraceFrame {
                    dt,
                    time_scale: 1.0,
                })
                .collect(),
            RawTrace::Detailed { frames } => frames,
        };
        Ok(Self { frames })
    }

    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Epoch {
    pub frame_index: usize,
    pub average: f32,
}

#[derive(Debug, Default)]
pub struct ReplayReport {
    pub epochs: Vec<Epoch>,
    pub skipped: usize,
    frame_times: Vec<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub frames: usize,
    pub total_seconds: f32,
    pub avg_ms: f32,
    pub min_ms: f32,
    pub max_ms: f32,
    pub p95_ms: f32,
    pub average_fps: f32,
}

/// Runs every frame of `trace` through a fresh sampler.
pub fn replay(trace: &FrameTrace, config: SamplerConfig) -> ReplayReport {
    let mut sampler = FpsSampler::new(config);
    let mut report = ReplayReport::default();

    for (index, frame) in trace.frames.iter().enumerate() {
        if !frame.dt.is_finite() || frame.dt <= 0.0 {
            report.skipped += 1;
        } else {
            report.frame_times.push(frame.dt);
        }
        if let Some(average) = sampler.tick_scaled(frame.dt, frame.time_scale) {
            report.epochs.push(Epoch {
                frame_index: index,
                average,
            });
        }
    }

    report
}

impl ReplayReport {
    pub fn stats(&self) -> Option<FrameStats> {
        if self.frame_times.is_empty() {
            return None;
        }

        let frames = self.frame_times.len();
        let total_seconds: f32 = self.frame_times.iter().copied().sum();
        let min = self.frame_times.iter().copied().fold(f32::MAX, f32::min);
        let max = self.frame_times.iter().copied().fold(f32::MIN, f32::max);

        let mut sorted = self.frame_times.clone();
        sorted.sort_by(f32::total_cmp);
        let p95_index = ((sorted.len() as f32 * 0.95).ceil() as usize).clamp(1, sorted.len()) - 1;

        Some(FrameStats {
            frames,
            total_seconds,
            avg_ms: total_seconds / frames as f32 * 1000.0,
            min_ms: min * 1000.0,
            max_ms: max * 1000.0,
            p95_ms: sorted[p95_index] * 1000.0,
            average_fps: frames as f32 / total_seconds,
        })
    }

    pub fn print_summary(&self) {
        for epoch in &self.epochs {
            println!(
                "frame {:>6}: {}",
                epoch.frame_index,
                format_fps(epoch.average)
            );
        }

        let Some(stats) = self.stats() else {
            println!("Replay finished with no usable frames.");
            return;
        };

        println!(
            "Replay complete: {} frames over {:.2}s, {} epochs, {} skipped.",
            stats.frames,
            stats.total_seconds,
            self.epochs.len(),
            self.skipped
        );
        println!(
            "- Frame ms: avg {:>5.4} | p95 {:>5.4} | min {:>5.4} | max {:>5.4}",
            stats.avg_ms, stats.p95_ms, stats.min_ms, stats.max_ms
        );
        println!("- FPS: avg {:>5.1}", stats.average_fps);
    }
}
