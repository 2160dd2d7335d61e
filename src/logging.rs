//! Logger bootstrap shared by the binary and tests.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, all debug messages are printed. Otherwise only
/// info level and above are shown. `RUST_LOG` overrides either default.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // A logger may already be installed when tests share a process.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised; keeping existing configuration");
    }
}
