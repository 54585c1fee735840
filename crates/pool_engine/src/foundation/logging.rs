//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging with a fallback level
///
/// `RUST_LOG` still wins when it is set; otherwise `level` (e.g. `"info"`,
/// `"pool_engine=debug"`) is used as the filter. Calling this twice is
/// harmless, the second install attempt is ignored.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
