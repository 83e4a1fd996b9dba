//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise `default_filter` applies.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter used when neither `RUST_LOG` nor an application filter is given
pub const DEFAULT_FILTER: &str = "info";

/// Install a global fmt subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
