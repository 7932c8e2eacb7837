//! Logger initialization for binaries
//!
//! Library code only uses the `log` facade; binaries call `init` once at
//! startup.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger. Idempotent; `RUST_LOG` overrides the
/// Info default.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }
        builder.init();
    });
}
