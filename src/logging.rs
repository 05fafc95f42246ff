use std::sync::Once;

static INIT: Once = Once::new();

/// Installs `env_logger` once. Honors `RUST_LOG`, otherwise logs at `info`.
pub fn init() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    });
}
