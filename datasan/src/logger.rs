// datasan/src/logger.rs
//! Logger setup for the binary.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs `env_logger` on stderr.
///
/// An explicit `level` wins over `RUST_LOG`. Without one, `RUST_LOG` is
/// honoured and defaults to `warn`. Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).try_init().ok();
}
