//! One-time logger setup

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; subsequent calls are ignored.
/// Honors `RUST_LOG`, defaulting to info-level visibility.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
