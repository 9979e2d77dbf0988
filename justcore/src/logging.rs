//! Logging setup shared by JustCalculate binaries.

use tracing_subscriber::EnvFilter;

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` wins over `default_filter`; an invalid filter string falls back
/// to `info`. Calling this twice is harmless.
pub fn init(default_filter: &str) {
    let filter = resolve_filter(std::env::var("RUST_LOG").ok().as_deref(), default_filter);

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

fn resolve_filter(env: Option<&str>, default_filter: &str) -> EnvFilter {
    env.and_then(|s| EnvFilter::try_new(s).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
