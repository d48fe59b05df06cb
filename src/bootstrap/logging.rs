use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise everything at `info` and above
pub fn initialize() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}
