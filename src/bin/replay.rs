use std::path::PathBuf;
use std::process::ExitCode;

use fpsmeter::config::{self, AppConfig};
use fpsmeter::logging;
use fpsmeter::trace::{self, FrameTrace};

fn main() -> ExitCode {
    logging::init();

    let mut args = std::env::args_os().skip(1);
    let Some(trace_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: replay <trace.json> [config.json]");
        return ExitCode::FAILURE;
    };
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let app_config = AppConfig::load_from(&config_path);

    let trace = match FrameTrace::load(&trace_path) {
        Ok(trace) => trace,
        Err(err) => {
            eprintln!("{}: {err}", trace_path.display());
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Replaying {} frames from {} ({:.2}s epochs).",
        trace.frames.len(),
        trace_path.display(),
        app_config.sampler.update_interval(),
    );
    trace::replay(&trace, app_config.sampler).print_summary();

    ExitCode::SUCCESS
}
