//! Logging setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install a global tracing subscriber
///
/// `RUST_LOG` takes precedence over `log_level`. `format` is `"json"` or `"pretty"`.
/// Returns `false` when a subscriber was already installed.
pub fn init_observability(log_level: &str, format: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .is_ok(),
        _ => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok(),
    }
}

/// Install a subscriber from the `[logging]` section
pub fn init_from_config(config: &LoggingConfig) -> bool {
    init_observability(&config.level, &config.format)
}
