use std::io;
use std::path::PathBuf;
use std::time::Instant;

use fpsmeter::clock::{FrameClock, FrameLimiter};
use fpsmeter::config::{self, AppConfig};
use fpsmeter::{FpsDisplay, TerminalSink, logging};

fn main() {
    logging::init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);
    let app_config = AppConfig::load_from(&config_path);

    log::info!(
        "Sampling every {:.2}s (time scale {}, cap {})",
        app_config.sampler.update_interval(),
        app_config.time_scale,
        app_config
            .max_fps
            .map_or_else(|| "none".to_owned(), |fps| format!("{fps} fps")),
    );

    run(&app_config);
    println!();
}

fn run(app_config: &AppConfig) {
    let mut display = FpsDisplay::new(app_config.sampler, TerminalSink::new(io::stdout()));
    let mut clock = FrameClock::new();
    let limiter = FrameLimiter::new(app_config.max_fps);
    let deadline = app_config.run_for.and_then(|run_for| {
        let deadline = Instant::now().checked_add(run_for);
        if deadline.is_none() {
            log::warn!("Run time {run_for:?} is too long; running until stopped");
        }
        deadline
    });

    loop {
        let dt = clock.tick();
        display.frame(dt, app_config.time_scale);

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            break;
        }
        limiter.sleep(clock.since_last_frame());
    }
}
