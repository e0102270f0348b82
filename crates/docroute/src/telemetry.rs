use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, honoring `RUST_LOG` and defaulting
/// to `info`. Embedders call this once at startup; repeated calls (as in
/// tests) are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Bridge `log` records from dependencies into tracing.
    let _ = tracing_log::LogTracer::init();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
