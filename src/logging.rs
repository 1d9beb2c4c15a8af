//! Log subscriber setup
//!
//! The library only emits `tracing` events. A host that has no subscriber of
//! its own can call [`init`] (the C entry points do this on readiness check).
//! Verbosity comes from `EDGE_LOG` using `EnvFilter` syntax, default `info`.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "EDGE_LOG";

static INIT: OnceLock<bool> = OnceLock::new();

/// Install a fmt subscriber once per process.
///
/// Returns false if another global subscriber was already installed, in which
/// case events go to that one.
pub fn init() -> bool {
    *INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .is_ok()
    })
}
