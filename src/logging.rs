use tracing_subscriber::EnvFilter;

/// Initialise logging at `info` level. The level can be overridden via the
/// `RUST_LOG` environment variable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
