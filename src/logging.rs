use std::env;

use log::LevelFilter;

/// Initialize stderr logging.
///
/// Defaults to `Warn` so the terminal UI stays clean; `debug_enabled` raises
/// it to `Debug`. An explicit `RUST_LOG` overrides both.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // A second init (e.g. from tests) is harmless.
    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
