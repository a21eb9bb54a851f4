use tracing_subscriber::EnvFilter;

/// Initialize a simple stdout tracing subscriber for development.
///
/// `RUST_LOG` takes precedence over the default filter.
pub fn init_stdout_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,happyshop_core=debug"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
