//! Monitor Configuration Module
//!
//! Provides crate-wide configuration loaded from TOML files, replacing all
//! hardcoded scheduling and provider settings with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `CROPSENTINEL_CONFIG` environment variable (path to TOML file)
//! 2. `cropsentinel.toml` in the current working directory
//! 3. Built-in defaults (matching the documented threshold constants)
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In the embedding application's startup:
//! config::init(MonitorConfig::load()?);
//!
//! // Anywhere in the codebase:
//! let threshold = config::get().scheduler.alert_threshold;
//! ```

mod monitor_config;

pub use monitor_config::*;

use std::sync::OnceLock;

/// Global monitor configuration, initialized once at startup.
static MONITOR_CONFIG: OnceLock<MonitorConfig> = OnceLock::new();

/// Initialize the global monitor configuration.
///
/// Must be called exactly once before any calls to `get()`. A second call
/// is ignored with a warning.
pub fn init(config: MonitorConfig) {
    if MONITOR_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once — ignoring");
    }
}

/// Get a reference to the global monitor configuration, falling back to the
/// built-in defaults when `init()` was never called.
pub fn get() -> &'static MonitorConfig {
    MONITOR_CONFIG.get_or_init(MonitorConfig::default)
}

/// Check whether the config has been initialized.
///
/// Useful for tests and optional config paths.
pub fn is_initialized() -> bool {
    MONITOR_CONFIG.get().is_some()
}
