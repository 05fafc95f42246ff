use std::io::Write;

use log::warn;

use crate::fps::{FpsSampler, SamplerConfig, format_fps};

/// Host-side text widget that shows the formatted frame rate.
pub trait TextSink {
    fn set_text(&mut self, text: &str);
}

impl TextSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Feeds a sampler once per frame and refreshes the sink when an epoch closes.
pub struct FpsDisplay<S: TextSink> {
    sampler: FpsSampler,
    sink: S,
}

impl<S: TextSink> FpsDisplay<S> {
    pub fn new(config: SamplerConfig, mut sink: S) -> Self {
        let sampler = FpsSampler::new(config);
        sink.set_text(&sampler.label());
        Self { sampler, sink }
    }

    pub fn frame(&mut self, delta_time: f32, time_scale: f32) {
        if let Some(fps) = self.sampler.tick_scaled(delta_time, time_scale) {
            self.sink.set_text(&format_fps(fps));
        }
    }

    pub fn sampler(&self) -> &FpsSampler {
        &self.sampler
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Rewrites a single terminal line with each update.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TextSink for TerminalSink<W> {
    fn set_text(&mut self, text: &str) {
        let result = write!(self.out, "\r{text:<16}").and_then(|_| self.out.flush());
        if let Err(err) = result {
            warn!("Failed to write frame rate: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[derive(Default)]
    struct RecordingSink {
        texts: Vec<String>,
    }

    impl TextSink for RecordingSink {
        fn set_text(&mut self, text: &str) {
            self.texts.push(text.to_owned());
        }
    }

    #[test]
    fn pushes_initial_label() {
        let display = FpsDisplay::new(SamplerConfig::default(), String::new());
        assert_eq!(display.sink(), "0.00 FPS");
    }

    #[test]
    fn updates_only_when_epoch_closes() {
        let config = SamplerConfig::new(0.5).unwrap();
        let mut display = FpsDisplay::new(config, RecordingSink::default());
        for _ in 0..4 {
            display.frame(0.1, 1.0);
        }
        assert_eq!(display.sink().texts, vec!["0.00 FPS"]);

        display.frame(0.1, 1.0);
        display.frame(0.1, 1.0);
        assert_eq!(display.sink().texts, vec!["0.00 FPS", "10.00 FPS"]);
        assert!(display.sampler().sample_count() <= 1);
    }

    #[test]
    fn skipped_frames_leave_text_alone() {
        let config = SamplerConfig::new(0.1).unwrap();
        let mut display = FpsDisplay::new(config, RecordingSink::default());
        display.frame(0.0, 1.0);
        display.frame(-1.0, 1.0);
        assert_eq!(display.into_sink().texts.len(), 1);
    }

    #[test]
    fn terminal_sink_rewrites_line() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.set_text("60.00 FPS");
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert!(written.starts_with("\r60.00 FPS"));
        assert_eq!(written.len(), 17);
    }
}
