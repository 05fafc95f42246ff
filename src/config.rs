use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::fps::SamplerConfig;

const DEFAULT_TIME_SCALE: f32 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub sampler: SamplerConfig,
    pub time_scale: f32,
    pub max_fps: Option<f32>,
    pub run_for: Option<Duration>,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    /// Reads `path`, falling back to defaults when it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        match fs::read(path) {
            Ok(bytes) => match serde_json::from_slice::<RawConfig>(&bytes) {
                Ok(raw) => AppConfig::from_raw(raw),
                Err(err) => {
                    warn!("Failed to parse config file {}: {}", path.display(), err);
                    AppConfig::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => AppConfig::default(),
            Err(err) => {
                warn!("Failed to read config file {}: {}", path.display(), err);
                AppConfig::default()
            }
        }
    }

    fn from_raw(raw: RawConfig) -> Self {
        let sampler = match raw.update_interval {
            Some(interval) => SamplerConfig::new(interval).unwrap_or_else(|err| {
                warn!("{err}; falling back to default");
                SamplerConfig::default()
            }),
            None => SamplerConfig::default(),
        };

        let mut time_scale = raw.time_scale.unwrap_or(DEFAULT_TIME_SCALE);
        if !time_scale.is_finite() || time_scale < 0.0 {
            warn!("Invalid time_scale {}; falling back to default", time_scale);
            time_scale = DEFAULT_TIME_SCALE;
        }

        Self {
            sampler,
            time_scale,
            max_fps: positive_or_none("max_fps", raw.max_fps),
            run_for: run_duration(raw.run_seconds),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerConfig::default(),
            time_scale: DEFAULT_TIME_SCALE,
            max_fps: None,
            run_for: None,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    update_interval: Option<f32>,
    time_scale: Option<f32>,
    max_fps: Option<f32>,
    run_seconds: Option<f32>,
}

fn positive_or_none(key: &str, value: Option<f32>) -> Option<f32> {
    let value = value?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        warn!("Invalid {} {}; ignoring", key, value);
        None
    }
}

fn run_duration(seconds: Option<f32>) -> Option<Duration> {
    let seconds = positive_or_none("run_seconds", seconds)?;
    match Duration::try_from_secs_f32(seconds) {
        Ok(duration) => Some(duration),
        Err(err) => {
            warn!("run_seconds {} out of range ({}); running until stopped", seconds, err);
            None
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn parse(json: &str) -> AppConfig {
        AppConfig::from_raw(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(parse("{}"), AppConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = parse(
            r#"{ "update_interval": 1.5, "time_scale": 0.5, "max_fps": 144, "run_seconds": 10 }"#,
        );
        assert_eq!(config.sampler.update_interval(), 1.5);
        assert_eq!(config.time_scale, 0.5);
        assert_eq!(config.max_fps, Some(144.0));
        assert_eq!(config.run_for, Some(Duration::from_secs(10)));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = parse(
            r#"{ "update_interval": 0, "time_scale": -2, "max_fps": -30, "run_seconds": 0 }"#,
        );
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn oversized_run_seconds_runs_forever() {
        let config = parse(r#"{ "run_seconds": 1e30 }"#);
        assert_eq!(config.run_for, None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn null_cap_means_unlimited() {
        let config = parse(r#"{ "max_fps": null }"#);
        assert_eq!(config.max_fps, None);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("fpsmeter-missing-config-7f3a.json");
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!(
            "fpsmeter-malformed-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, b"{ update_interval: ").unwrap();
        let config = AppConfig::load_from(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(config, AppConfig::default());
    }
}
