pub mod clock;
pub mod config;
pub mod display;
pub mod fps;
pub mod logging;
pub mod trace;

pub use display::{FpsDisplay, TerminalSink, TextSink};
pub use fps::{ConfigError, FpsSampler, SamplerConfig, format_fps};
