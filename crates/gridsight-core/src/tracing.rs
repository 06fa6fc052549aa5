//! Tracing subscriber setup.
//!
//! Library code only emits events through `tracing` macros. The host
//! process calls [`init`] once at start-up to install a subscriber.

use std::sync::atomic::{AtomicBool, Ordering};

use ::tracing_subscriber::layer::SubscriberExt;
use ::tracing_subscriber::util::SubscriberInitExt;
use ::tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::GridsightError;

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Returns `Ok(false)`
/// if a previous call already installed the subscriber.
pub fn init(config: &ObservabilityConfig) -> Result<bool, GridsightError> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(false);
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            TRACING_INITIALIZED.store(false, Ordering::SeqCst);
            GridsightError::Tracing(format!("invalid log level {:?}: {e}", config.log_level))
        })?;

    ::tracing_subscriber::registry()
        .with(env_filter)
        .with(::tracing_subscriber::fmt::layer().with_target(config.with_target))
        .try_init()
        .map_err(|e| GridsightError::Tracing(format!("failed to initialize tracing: {e}")))?;

    Ok(true)
}

/// Whether [`init`] has installed a subscriber in this process.
pub fn is_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::SeqCst)
}
