use std::sync::Once;

static INIT: Once = Once::new();

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG` (default
/// `info`). Safe to call repeatedly; a subscriber installed by the embedding
/// process takes precedence.
pub fn init() {
    INIT.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!("logging initialized");
        }
    });
}
